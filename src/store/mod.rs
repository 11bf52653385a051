// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token persistence.
//!
//! A store holds at most one bearer credential. Expiry is never tracked
//! here; the backend is the only authority on whether a token still works.

pub mod file;

pub use file::FileTokenStore;

use crate::models::Credential;
use std::sync::RwLock;

/// Single-key credential persistence.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &Credential) -> Result<(), StoreError>;
    fn read(&self) -> Result<Option<Credential>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Token store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Process-local store. Does not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Credential) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &Credential) -> Result<(), StoreError> {
        *self.token.write().map_err(|_| StoreError::Poisoned)? = Some(token.clone());
        Ok(())
    }

    fn read(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self.token.read().map_err(|_| StoreError::Poisoned)?.clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.write().map_err(|_| StoreError::Poisoned)? = None;
        Ok(())
    }
}
