use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape with is invalid. Selector: {0}")]
    InvalidSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Couldn't resolve a link: {0}")]
    Url(#[from] url::ParseError),

    #[error("Regex Error: {0}")]
    Regex(#[from] regex::Error),
}
