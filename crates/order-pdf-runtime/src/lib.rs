use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

mod worker;

pub use worker::worker_task;

// Re-export types from the library crate
pub use order_pdf::{OrderDocumentRequest, OrderPdfError, OrderStatistics};

/// Commands sent from a front end to the worker
#[derive(Debug)]
pub enum PdfCommand {
    Generate {
        job: JobId,
        request: OrderDocumentRequest,
        output_path: PathBuf,
    },
    /// Stop a running job before its next page
    Cancel {
        job: JobId,
    },
    CalculateStats {
        job: JobId,
        request: OrderDocumentRequest,
    },
}

/// Updates sent from the worker to the front end.
///
/// Every `Generate` job ends with exactly one of `Complete`, `Cancelled`
/// or `Error`.
#[derive(Debug, Clone)]
pub enum PdfUpdate {
    Started {
        job: JobId,
        total_pages: usize,
    },
    Complete {
        job: JobId,
        path: PathBuf,
        size_bytes: usize,
    },
    Cancelled {
        job: JobId,
    },
    StatsCalculated {
        job: JobId,
        stats: OrderStatistics,
    },
    Error {
        job: JobId,
        message: String,
    },
}

impl PdfUpdate {
    pub fn job(&self) -> JobId {
        match self {
            PdfUpdate::Started { job, .. }
            | PdfUpdate::Complete { job, .. }
            | PdfUpdate::Cancelled { job }
            | PdfUpdate::StatsCalculated { job, .. }
            | PdfUpdate::Error { job, .. } => *job,
        }
    }

    /// Whether this update ends its job
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PdfUpdate::Started { .. })
    }
}

/// Caller-chosen handle for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Job {0} is already running")]
    DuplicateJob(JobId),
    #[error(transparent)]
    Pdf(#[from] OrderPdfError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
