use thiserror::Error;

/// Centralized error types for the application
///
/// Collaborator clients (recognition, catalog, translation, tips) return this
/// enum; the resolution cascade converts every variant into "this step
/// produced nothing" and moves on, so none of these ever reach the user.
///
/// # Example
///
/// ```no_run
/// use akkordy::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP status code errors
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// JSON decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A collaborator answered, but not in the shape we expected
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// Missing or invalid configuration (API keys, base URLs)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anyhow errors (for general error handling)
    #[error("Application error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl From<teloxide::RequestError> for AppError {
    fn from(err: teloxide::RequestError) -> Self {
        AppError::Anyhow(anyhow::anyhow!("Telegram error: {}", err))
    }
}

impl From<teloxide::DownloadError> for AppError {
    fn from(err: teloxide::DownloadError) -> Self {
        AppError::Anyhow(anyhow::anyhow!("Telegram download error: {}", err))
    }
}
