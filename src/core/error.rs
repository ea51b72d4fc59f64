use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Invalid selection {index}: menu has {menu_len} options")]
    InvalidSelection { index: usize, menu_len: usize },

    #[error("A time rift cannot be opened during a milestone chapter")]
    RiftUnavailable,

    #[error("Session has already concluded")]
    SessionFinished,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LifeError {
    /// True for input mistakes the front end should simply re-prompt on
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LifeError::InvalidSelection { .. } | LifeError::RiftUnavailable
        )
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;
