use thiserror::Error;

pub mod types;
pub mod utils;
pub mod env;
pub mod issuer;
pub mod fanout;
pub mod placeholder;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("range error: {0}")]
    Range(String),
    #[error("config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            CoreError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            CoreError::Decode(e.to_string())
        } else {
            CoreError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Decode(e.to_string())
    }
}
