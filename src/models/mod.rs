// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models exchanged with the storefront backend.

pub mod auth;
pub mod credential;
pub mod user;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use credential::Credential;
pub use user::{Role, RoleInfo, UnknownRole, UserProfile};
