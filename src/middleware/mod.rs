// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Render-time guards (authorization gate).

pub mod auth;

pub use auth::{authorize, guard, GateDecision};
