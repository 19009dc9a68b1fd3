pub mod artwork;
mod cancel;
pub mod constants;
mod generate;
pub mod layout;
mod options;
mod placeholder;
pub mod qr;
pub mod render;
mod stats;
mod types;

pub use artwork::{ArtworkLoadError, ArtworkLoader, DirectoryLoader, LoadedArtwork, NoArtworkLoader};
pub use cancel::CancellationToken;
pub use generate::{OrderPdfGenerator, generate_order_pdf, pdf_filename, save_pdf};
pub use options::*;
pub use placeholder::{placeholder_image, placeholder_png};
pub use qr::{IdentifierEncoder, IdentifierError, QrEncoder};
pub use stats::calculate_statistics;
pub use types::*;
