// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.
//!
//! The backend origin is configuration, never baked into a build. A `.env`
//! file in the working directory is honoured for local development.

use reqwest::Url;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8585/api/";
const DEFAULT_TOKEN_PATH: &str = ".storefront/token";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin including the `/api/` prefix. Always ends with `/`.
    pub api_base_url: Url,
    /// File backing the durable token store
    pub token_path: PathBuf,
    /// Per-request timeout
    pub request_timeout: Duration,

    // --- Navigation targets ---
    /// Login entry point (401 and unauthenticated redirects)
    pub login_route: String,
    /// Access-denied destination (role mismatch)
    pub forbidden_route: String,
    /// Landing page after a successful sign-in
    pub home_route: String,
    /// Public landing page: where logout and unknown paths end up
    pub public_route: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            // Literal is a valid absolute URL.
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).unwrap(),
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            login_route: "/login".to_string(),
            forbidden_route: "/forbidden".to_string(),
            home_route: "/dashboard".to_string(),
            public_route: "/".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Self {
            api_base_url: parse_base_url(&base)?,
            token_path: env::var("TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH)),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            ..Self::default()
        })
    }

    /// Same as `Default`, pointed at a different backend.
    pub fn with_base_url(base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(base)?,
            ..Self::default()
        })
    }
}

/// Parse the backend base URL, forcing a trailing slash so relative
/// endpoint paths join under the `/api/` prefix instead of replacing it.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };

    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}
