//! Error handling for HTTP handlers

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use void_wallet::{Error as WalletError, ErrorKind};

/// Errors returned by API handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required request field is missing or empty
    #[error("{0}")]
    MissingField(&'static str),

    /// The request body is missing or is not valid JSON
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    /// The credential type tag is not recognised
    #[error("Invalid credential type")]
    InvalidCredentialType,

    /// A failure reported by the wallet core
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Result type for API handlers
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidCredentialType | Self::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Wallet(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            Self::Wallet(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short summary shown to users
    fn summary(&self) -> String {
        match self {
            Self::MissingField(_) | Self::InvalidCredentialType => self.to_string(),
            Self::InvalidBody(_) => "Invalid request body".to_string(),
            Self::Wallet(e) => match e.kind() {
                ErrorKind::InvalidMnemonic => "Invalid mnemonic".to_string(),
                ErrorKind::InvalidPrivateKey => {
                    "Invalid private key format (not valid hex or WIF)".to_string()
                }
                ErrorKind::InvalidWif => "Invalid WIF".to_string(),
                ErrorKind::UnsupportedCredentialKind => "Invalid credential type".to_string(),
                _ => "Internal error".to_string(),
            },
        }
    }

    fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Wallet(e) => Some(e.kind()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(kind = ?self.kind(), "request rejected");
        }

        let body = Json(json!({
            "success": false,
            "error": self.summary(),
            "message": self.to_string(),
            "kind": self.kind(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MissingField("Mnemonic is required").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(WalletError::InvalidMnemonic("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(WalletError::Entropy("gone".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_summary_hides_internal_detail() {
        let err = ApiError::from(WalletError::Encoding("buffer".into()));
        assert_eq!(err.summary(), "Internal error");
    }
}
