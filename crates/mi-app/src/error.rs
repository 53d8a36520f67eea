//! Error types for the mi-app service layer.

use mi_core::MiError;

/// Application error type that wraps errors from the lower crates and the
/// remote backend behind one interface for the CLI and embedding UIs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] MiError),

    #[error("Project error: {0}")]
    Project(#[from] mi_project::ProjectError),

    #[error("Backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected backend response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for mi-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Failures of the persistence or simulation service: recoverable, and
    /// never accompanied by a local state change.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            AppError::Core(MiError::Transport { .. })
                | AppError::Backend { .. }
                | AppError::UnexpectedResponse(_)
        )
    }

    /// The core error, if this wraps one.
    pub fn core(&self) -> Option<&MiError> {
        match self {
            AppError::Core(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let what = if err.is_timeout() {
            format!("request timeout: {err}")
        } else if err.is_connect() {
            format!("connection error: {err}")
        } else if err.is_decode() {
            return AppError::UnexpectedResponse(err.to_string());
        } else {
            format!("HTTP error: {err}")
        };
        AppError::Core(MiError::transport(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_classification() {
        assert!(AppError::from(MiError::transport("refused")).is_external());
        assert!(
            AppError::Backend {
                status: 500,
                message: "db down".into()
            }
            .is_external()
        );
        assert!(!AppError::from(MiError::conflict("busy")).is_external());
    }
}
