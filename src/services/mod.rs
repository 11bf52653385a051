// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend access layer.

pub mod api_client;
pub mod backoffice;
pub mod catalog;
pub mod session;

pub use api_client::ApiClient;
pub use backoffice::BackofficeService;
pub use catalog::CatalogService;
pub use session::{SessionController, SessionState};
