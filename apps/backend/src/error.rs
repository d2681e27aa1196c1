use thiserror::Error;

use crate::errors::{DomainError, ErrorCode};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Wire code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(err) => err.code(),
            AppError::BadRequest { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Human-readable message sent to the client.
    ///
    /// Configuration details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Domain(err) => err.detail().to_string(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Config { .. } => Self::humanize_code(self.code().as_str()),
        }
    }

    /// True when the error is the client's fault rather than the server's.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Domain(_) | AppError::BadRequest { .. })
            && self.code() != ErrorCode::Internal
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code: ErrorCode::BadRequest,
            detail: detail.into(),
        }
    }

    pub fn bad_protocol(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code: ErrorCode::BadProtocol,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let lower = word.to_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::bad_request(format!("Malformed message: {e}"))
    }
}
