use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerksError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "xlsx")]
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(not(feature = "xlsx"))]
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Nothing to analyze: pass statement files or --text")]
    NoInput,

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, PerksError>;
