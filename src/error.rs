use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TspError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid coordinate at index {index}: ({lat}, {lon})")]
    InvalidCoordinate { index: usize, lat: f64, lon: f64 },
    #[error("non-finite distance between {from} and {to}")]
    NonFiniteDistance { from: usize, to: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TspError>;

impl TspError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
