use horde_alert::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("alert configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid clock: {0}")]
    Clock(String),
}

pub type SimResult<T> = Result<T, SimError>;
