use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsdeskError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed payload: {0}")]
    Payload(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Identity service rejected login: {0}")]
    Identity(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NewsdeskError>;
