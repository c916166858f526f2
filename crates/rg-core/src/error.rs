/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable is set but could not be parsed.
    #[error("invalid value for {var}: \"{value}\"")]
    InvalidVar {
        /// The variable name.
        var: &'static str,
        /// The unparseable value.
        value: String,
    },
}
