// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authorization gate for protected views.
//!
//! The gate is a pure decision over the current [`SessionState`]:
//! - while the session is hydrating, show a loading placeholder;
//! - without a session, redirect to login, remembering the requested path;
//! - with required roles, the profile's role must be one of them.
//!
//! A session that holds a token but has no profile (the profile fetch
//! failed) is denied any role-restricted view. Views without required
//! roles still render for it.

use crate::config::Config;
use crate::models::Role;
use crate::navigation::Location;
use crate::routes::Access;
use crate::services::session::SessionState;

/// Outcome of a gate check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session not settled; render a neutral placeholder.
    Loading,
    Render,
    Redirect(Location),
}

impl GateDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, GateDecision::Render)
    }
}

/// Guard a protected view requested at `requested`.
pub fn guard(
    state: &SessionState,
    required_roles: &[Role],
    requested: &str,
    config: &Config,
) -> GateDecision {
    match state {
        SessionState::Hydrating => GateDecision::Loading,
        SessionState::Unauthenticated => GateDecision::Redirect(
            Location::replace(config.login_route.as_str()).with_from(requested),
        ),
        SessionState::Authenticated { profile, .. } => {
            if required_roles.is_empty() || required_roles.contains(&profile.role()) {
                GateDecision::Render
            } else {
                tracing::info!(
                    role = %profile.role(),
                    path = requested,
                    "Access denied: role not permitted"
                );
                forbidden(config)
            }
        }
        SessionState::TokenOnly { .. } => {
            if required_roles.is_empty() {
                GateDecision::Render
            } else {
                tracing::info!(path = requested, "Access denied: role unknown");
                forbidden(config)
            }
        }
    }
}

/// Check a route's access requirement. Public pages still wait for the
/// session to settle, so nothing renders during hydration.
pub fn authorize(
    state: &SessionState,
    access: &Access,
    requested: &str,
    config: &Config,
) -> GateDecision {
    match access {
        Access::Public if state.is_loading() => GateDecision::Loading,
        Access::Public => GateDecision::Render,
        Access::Authenticated | Access::Roles(_) => {
            guard(state, access.required_roles(), requested, config)
        }
    }
}

fn forbidden(config: &Config) -> GateDecision {
    GateDecision::Redirect(Location::replace(config.forbidden_route.as_str()))
}
