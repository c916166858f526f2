/// Alias for `Result<T, SyncError>`.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors from polling or persisting reality data.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] rg_core::CoreError),

    /// The HTTP request failed or returned a non-success status.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("malformed {api} response: {detail}")]
    Malformed {
        /// Which API produced the response.
        api: &'static str,
        /// What was wrong with it.
        detail: String,
    },

    /// The database rejected an operation.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
