//! Error types for kadi-gestures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("script parse error: {0}")]
    ScriptParse(#[from] serde_json::Error),

    #[error("invalid script: {0}")]
    InvalidScript(String),

    #[error("event loop error: {0}")]
    EventLoop(#[from] calloop::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
