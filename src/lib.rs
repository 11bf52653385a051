// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Storefront session: client-side authentication for the storefront API
//!
//! This crate keeps the bearer token, signs every backend request with it,
//! restores the session on startup, and decides which views a session may
//! enter.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use navigation::Navigator;
use services::{BackofficeService, CatalogService, SessionController};
use std::sync::Arc;
use store::TokenStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: Arc<SessionController>,
    pub catalog: CatalogService,
    pub backoffice: BackofficeService,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> error::Result<Self> {
        let session = Arc::new(SessionController::new(config.clone(), store, navigator)?);

        Ok(Self {
            config,
            catalog: CatalogService::new(session.clone()),
            backoffice: BackofficeService::new(session.clone()),
            session,
        })
    }
}
