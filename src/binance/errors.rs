use thiserror::Error;

/// Failure modes of the market-data API seam.
///
/// All variants degrade to "skip this pair this pass" at the monitor
/// boundary; none of them abort a pass or the process.
#[derive(Error, Debug)]
pub enum MarketApiError {
    #[error("request timed out")]
    Timeout,

    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    #[error("symbol not found")]
    NotFound,

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for MarketApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            MarketApiError::Timeout
        } else if e.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            MarketApiError::NotFound
        } else if e.is_decode() {
            MarketApiError::Malformed(e.to_string())
        } else {
            MarketApiError::Unavailable(e.to_string())
        }
    }
}

impl From<std::num::ParseFloatError> for MarketApiError {
    fn from(e: std::num::ParseFloatError) -> Self {
        MarketApiError::Malformed(e.to_string())
    }
}
