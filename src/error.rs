// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types.

use crate::store::StoreError;
use serde::Deserialize;

/// Errors surfaced by the API client and the session controller.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend rejected the credential (HTTP 401).
    #[error("Authentication rejected by backend")]
    AuthExpired,

    #[error("Backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Authentication response did not include a token")]
    MissingToken,

    #[error("Token store error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// True when the backend rejected the session credential.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthExpired => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an `Http` error from a non-success response body.
    ///
    /// The backend reports failures as `{"mensaje": "..."}`; other JSON
    /// shapes and plain-text bodies are kept verbatim.
    pub fn from_status_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            mensaje: Option<String>,
            message: Option<String>,
            error: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.mensaje.or(b.message).or(b.error))
            .unwrap_or_else(|| body.trim().to_string());

        ApiError::Http { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
