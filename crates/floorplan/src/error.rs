use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FloorplanError>;

#[derive(Debug, Error)]
pub enum FloorplanError {
    #[error("Room request list is empty")]
    EmptyRequest,

    #[error("Invalid dimensions for room '{room}': {width} x {height}")]
    InvalidDimension { room: String, width: f64, height: f64 },

    #[error("Invalid spacing margin: {0} (must be finite and >= 0)")]
    InvalidMargin(f64),

    #[error("Unknown room type at row {row}: {name}")]
    UnknownRoomType { row: usize, name: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("Invalid CSV row {row}: expected at least 1 column, got {got}")]
    CsvRow { row: usize, got: usize },

    #[error("Invalid number at row {row}: {value}")]
    ValueParse {
        row: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("JSON error: {0}")]
    Json(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Failed to create output directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<toml::de::Error> for FloorplanError {
    fn from(err: toml::de::Error) -> Self {
        FloorplanError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<serde_json::Error> for FloorplanError {
    fn from(err: serde_json::Error) -> Self {
        FloorplanError::Json(err.to_string())
    }
}
