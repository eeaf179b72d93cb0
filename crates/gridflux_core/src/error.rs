use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Duplicate column id: {0}")]
    DuplicateColumn(String),

    #[error("Unknown column id: {0}")]
    UnknownColumn(String),

    #[error("Invalid column order: {0}")]
    InvalidOrder(String),

    #[error("Invalid grid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GridError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn invalid_order(message: impl Into<String>) -> Self {
        Self::InvalidOrder(message.into())
    }
}
