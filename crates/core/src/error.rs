use thiserror::Error;

/// Error type shared by every layout crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("column index {index} out of range (at most {max} value columns)")]
    ColumnOutOfRange { index: usize, max: usize },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T, E = LayoutError> = std::result::Result<T, E>;
