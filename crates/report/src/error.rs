use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Chart rendering failed: {0}")]
    Chart(#[from] charts::ChartError),

    #[error("I/O error while writing the report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load image '{path}': {reason}")]
    Image { path: String, reason: String },

    #[error("PDF encoding failed: {0}")]
    Pdf(String),
}
