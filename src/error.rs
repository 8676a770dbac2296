use thiserror::Error;

#[derive(Debug, Error)]
pub enum AirsentryError {
    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AirsentryError>;
