use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Run-terminating failures. The only failure recovered anywhere is
/// [`MalformedExample`], which the page parser handles per item.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Page {url} has no {what}.")]
    MissingStructure { url: String, what: &'static str },

    #[error("Pagination cycle: {0} was already visited.")]
    PaginationCycle(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// A list item whose flattened text could not be split into a
/// sentence/translation pair. Carries the node's HTML for the diagnostic
/// line printed when the item is skipped.
#[derive(Debug, Error)]
#[error("malformed example: {html}")]
pub struct MalformedExample {
    pub html: String,
}
