use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnippetError {
    /// Import payload is not an array, or nothing valid survived filtering.
    #[error("import failed: {0}")]
    InvalidFormat(String),

    /// The user declined to provide a required value during add/edit.
    #[error("{0} is required")]
    EmptyField(&'static str),

    #[error("no command at index {index} (have {len})")]
    OutOfRange { index: usize, len: usize },

    /// Storage or browser API failure underneath a popup action.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type SnippetResult<T> = Result<T, SnippetError>;
