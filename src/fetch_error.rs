#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected response format")]
    ParseError,
    #[error("Failed to parse hour value: {0}")]
    HourError(String),
    #[error("Failed to parse temperature: {0}")]
    NumberError(String),
}
