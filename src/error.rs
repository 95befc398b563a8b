use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load PDF '{path}': {reason}")]
    PdfLoad { path: String, reason: String },

    #[error("Page {page} has an unusable page box: {reason}")]
    PageBox { page: usize, reason: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
