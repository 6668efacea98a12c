use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unknown conversion mode: {0} (expected 1/direct or 2/printf)")]
    UnknownMode(String),
    #[error("no code to convert")]
    EmptyInput,
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
