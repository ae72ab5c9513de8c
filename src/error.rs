use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("http client init failed: {0}")]
    ClientInit(String),

    #[error("none of the configured pairs resolve to a tradable symbol")]
    NoResolvablePairs,
}
