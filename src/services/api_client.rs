// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storefront REST client.
//!
//! Every backend call goes through [`ApiClient`]. On the way out it signs
//! the request with the stored bearer token, if any. On the way back it
//! maps a 401 to [`ApiError::AuthExpired`] and every other non-success
//! status to [`ApiError::Http`]. It never touches the token store beyond
//! reading it and never navigates; reacting to an expired session is the
//! session controller's job.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::store::TokenStore;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Storefront API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client for the configured backend, signing with `store`.
    pub fn new(config: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            store,
        })
    }

    /// Absolute URL of an endpoint. Leading slashes are ignored so that
    /// `"/admin/usuarios"` and `"admin/usuarios"` both land under `/api/`.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Validation(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// GET with JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path)?;
        decode(self.execute(request, path).await?).await
    }

    /// GET with query parameters and JSON response.
    pub async fn get_json_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, path)?.query(query);
        decode(self.execute(request, path).await?).await
    }

    /// POST a JSON body, JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path)?.json(body);
        decode(self.execute(request, path).await?).await
    }

    /// PUT a JSON body, JSON response.
    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        decode(self.execute(request, path).await?).await
    }

    /// DELETE, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(request, path).await?;
        Ok(())
    }

    /// Build a request, attaching `Authorization: Bearer` when a token is stored.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let builder = self.http.request(method, url);

        Ok(match self.store.read()? {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        })
    }

    /// Send a request and check its status.
    async fn execute(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            tracing::debug!(path, status = status.as_u16(), "API request succeeded");
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "Backend rejected credential (401)");
            return Err(ApiError::AuthExpired);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(path, status = status.as_u16(), "API request failed");
        Err(ApiError::from_status_body(status.as_u16(), &body))
    }
}

/// Parse a JSON body. An empty body decodes as JSON `null`, so callers
/// expecting `()`, `Option<_>` or `serde_json::Value` accept it.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };

    serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
