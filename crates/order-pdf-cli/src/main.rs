use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use order_pdf::{
    ArtworkLoader, CancellationToken, DirectoryLoader, NoArtworkLoader, OrderDocumentRequest,
    OrderPdfConfig, OrderPdfGenerator, calculate_statistics, generate_order_pdf, pdf_filename,
    save_pdf,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "opdf", about = "Print-ready order PDF generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the PDF for an order
    Generate {
        /// Order JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (defaults to <order number>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory holding artwork, optionally split into <owner id>/ folders
        #[arg(long)]
        artwork_dir: Option<PathBuf>,

        /// Generator config JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Give up after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Write the default generator config
    InitConfig {
        /// Config JSON file to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            artwork_dir,
            config,
            timeout_secs,
            stats_only,
        } => {
            let config = match config {
                Some(path) => OrderPdfConfig::load(&path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => OrderPdfConfig::default(),
            };
            let request = load_request(&input).await?;

            // Calculate and show statistics
            let stats = calculate_statistics(&request, &config);
            println!("Order {}:", request.display_order_number());
            println!("  Line items: {}", stats.line_items);
            println!("  Skipped items: {}", stats.skipped_items);
            println!("  Pages: {}", stats.total_pages);
            println!("  Page size changes: {}", stats.page_size_changes);
            for (width, height) in &stats.page_sizes_pt {
                println!("  Page size: {:.1} x {:.1} pt", width, height);
            }

            if stats_only {
                return Ok(());
            }

            let loader: Arc<dyn ArtworkLoader> = match artwork_dir {
                Some(dir) => Arc::new(DirectoryLoader::new(dir)),
                None => Arc::new(NoArtworkLoader),
            };
            let generator = Arc::new(OrderPdfGenerator::new(config)?.with_loader(loader));
            let cancel = match timeout_secs {
                Some(secs) => CancellationToken::with_timeout(Duration::from_secs(secs)),
                None => CancellationToken::new(),
            };

            let output = output.unwrap_or_else(|| {
                PathBuf::from(sanitize_filename(&pdf_filename(
                    request.order_number.as_deref(),
                )))
            });
            let bytes = generate_order_pdf(generator, request, cancel).await?;
            save_pdf(&bytes, &output).await?;
            println!("Generated {} bytes → {}", bytes.len(), output.display());
        }

        Commands::InitConfig { output } => {
            OrderPdfConfig::default().save(&output).await?;
            println!("Wrote default config → {}", output.display());
        }
    }

    Ok(())
}

async fn load_request(path: &Path) -> Result<OrderDocumentRequest> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read order {}", path.display()))?;
    let request = serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse order {}", path.display()))?;
    Ok(request)
}

/// Replace anything outside `[A-Za-z0-9._-]` so the name is safe on every filesystem
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
