/// Alias for `Result<T, StoryError>`.
pub type StoryResult<T> = Result<T, StoryError>;

/// Errors from story generation or persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] rg_core::CoreError),

    /// The HTTP request failed or returned a non-success status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The completion endpoint answered with an unusable payload.
    #[error("completion error: {0}")]
    Completion(String),

    /// A choice index outside the current choice list.
    #[error("invalid choice index: {0}")]
    InvalidChoice(usize),

    /// The requested save file does not exist.
    #[error("save not found: {0}")]
    SaveNotFound(String),

    /// Reading or writing a save file failed.
    #[error("save i/o error: {0}")]
    SaveIo(#[from] std::io::Error),

    /// A save file is not valid JSON or misses required fields.
    #[error("corrupt save file: {0}")]
    SaveCorrupt(#[from] serde_json::Error),
}
