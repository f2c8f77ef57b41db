use thiserror::Error;

pub type Result<T> = std::result::Result<T, NeoWsError>;

#[derive(Debug, Error)]
pub enum NeoWsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for NeoWsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            NeoWsError::Parse(err.to_string())
        } else {
            NeoWsError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for NeoWsError {
    fn from(err: serde_json::Error) -> Self {
        NeoWsError::Parse(err.to_string())
    }
}
