// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Login and registration payloads.

use crate::models::{Credential, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST auth/login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Body of `POST auth/registro`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1))]
    pub nombre: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(rename = "rolId")]
    pub rol_id: u32,
}

impl RegisterRequest {
    /// New buyer account (the default role on sign-up).
    pub fn buyer(nombre: &str, email: &str, password: &str) -> Self {
        Self::with_role(nombre, email, password, Role::Comprador)
    }

    pub fn with_role(nombre: &str, email: &str, password: &str, role: Role) -> Self {
        Self {
            nombre: nombre.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            rol_id: role.id(),
        }
    }
}

/// Response of login and registration. Only `token` is interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AuthResponse {
    pub fn credential(&self) -> Option<Credential> {
        self.token.as_deref().and_then(Credential::parse)
    }
}
