use sandbox_common::BodyId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("invalid scene config: {0}")]
    InvalidConfig(String),
    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("unknown body {0}")]
    UnknownBody(BodyId),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
