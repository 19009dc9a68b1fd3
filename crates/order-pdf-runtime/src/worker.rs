use crate::{JobId, PdfCommand, PdfUpdate, Result, RuntimeError};
use order_pdf::{
    CancellationToken, OrderDocumentRequest, OrderPdfError, OrderPdfGenerator,
    calculate_statistics, generate_order_pdf, save_pdf,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

type JobTable = Arc<Mutex<HashMap<JobId, CancellationToken>>>;

/// Async worker task that processes order commands and sends updates.
///
/// Each generation job runs as its own task, so a slow order never holds up
/// the next command. Returns once the command channel is closed and every
/// job has finished.
pub async fn worker_task(
    generator: Arc<OrderPdfGenerator>,
    mut command_rx: mpsc::UnboundedReceiver<PdfCommand>,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    let jobs: JobTable = Arc::new(Mutex::new(HashMap::new()));
    let mut handles: Vec<JoinHandle<()>> = Vec::new();

    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            PdfCommand::Generate {
                job,
                request,
                output_path,
            } => {
                let cancel = match register(&jobs, job).await {
                    Ok(cancel) => cancel,
                    Err(e) => {
                        let _ = update_tx.send(PdfUpdate::Error {
                            job,
                            message: e.to_string(),
                        });
                        continue;
                    }
                };

                handles.retain(|handle| !handle.is_finished());
                handles.push(tokio::spawn(handle_generate(
                    Arc::clone(&generator),
                    job,
                    request,
                    output_path,
                    cancel,
                    Arc::clone(&jobs),
                    update_tx.clone(),
                )));
            }
            PdfCommand::Cancel { job } => match jobs.lock().await.get(&job) {
                Some(cancel) => {
                    log::info!("Cancelling job {}", job);
                    cancel.cancel();
                }
                None => log::debug!("Cancel for job {} ignored, it is not running", job),
            },
            PdfCommand::CalculateStats { job, request } => {
                let stats = calculate_statistics(&request, generator.config());
                let _ = update_tx.send(PdfUpdate::StatsCalculated { job, stats });
            }
        }
    }

    for handle in handles {
        if let Err(e) = handle.await {
            log::error!("Generation task failed: {}", e);
        }
    }
}

async fn register(jobs: &JobTable, job: JobId) -> Result<CancellationToken> {
    let mut jobs = jobs.lock().await;
    if jobs.contains_key(&job) {
        return Err(RuntimeError::DuplicateJob(job));
    }
    let cancel = CancellationToken::new();
    jobs.insert(job, cancel.clone());
    Ok(cancel)
}

async fn handle_generate(
    generator: Arc<OrderPdfGenerator>,
    job: JobId,
    request: OrderDocumentRequest,
    output_path: PathBuf,
    cancel: CancellationToken,
    jobs: JobTable,
    update_tx: mpsc::UnboundedSender<PdfUpdate>,
) {
    let _ = update_tx.send(PdfUpdate::Started {
        job,
        total_pages: request.total_page_count(),
    });

    let result = run_job(generator, request, &output_path, cancel).await;
    jobs.lock().await.remove(&job);

    let update = match result {
        Ok(size_bytes) => {
            log::info!("Job {} wrote {} bytes to {:?}", job, size_bytes, output_path);
            PdfUpdate::Complete {
                job,
                path: output_path,
                size_bytes,
            }
        }
        Err(RuntimeError::Pdf(OrderPdfError::Cancelled)) => PdfUpdate::Cancelled { job },
        Err(e) => {
            log::error!("Job {} failed: {}", job, e);
            PdfUpdate::Error {
                job,
                message: format!("Failed to generate order PDF: {}", e),
            }
        }
    };
    let _ = update_tx.send(update);
}

async fn run_job(
    generator: Arc<OrderPdfGenerator>,
    request: OrderDocumentRequest,
    output_path: &Path,
    cancel: CancellationToken,
) -> Result<usize> {
    let bytes = generate_order_pdf(generator, request, cancel).await?;
    save_pdf(&bytes, output_path).await?;
    Ok(bytes.len())
}
