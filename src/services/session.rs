// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle: bootstrap, sign-in, sign-out, and forced sign-out.
//!
//! [`SessionController`] is the only writer of the in-memory session and,
//! apart from the token store's own users, the only writer of the stored
//! credential. Authenticated calls go through it so that a 401 from any
//! endpoint clears the token and sends the user to the login page.

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::middleware::auth::{authorize, GateDecision};
use crate::models::{AuthResponse, Credential, LoginRequest, RegisterRequest, UserProfile};
use crate::navigation::{Location, Navigator};
use crate::routes::{Resolution, RouteTable};
use crate::services::api_client::ApiClient;
use crate::store::TokenStore;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use validator::Validate;

/// Profile endpoint consulted during bootstrap.
pub const PROFILE_ENDPOINT: &str = "usuarios/me";
pub const LOGIN_ENDPOINT: &str = "auth/login";
pub const REGISTER_ENDPOINT: &str = "auth/registro";

/// In-memory session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Bootstrap has not settled yet. No access decision may be made.
    Hydrating,
    Unauthenticated,
    /// A token is held but the profile could not be fetched.
    TokenOnly { credential: Credential },
    Authenticated {
        credential: Credential,
        profile: UserProfile,
    },
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Hydrating)
    }

    /// True when a credential is held (with or without a profile).
    pub fn is_present(&self) -> bool {
        self.credential().is_some()
    }

    pub fn credential(&self) -> Option<&Credential> {
        match self {
            SessionState::TokenOnly { credential }
            | SessionState::Authenticated { credential, .. } => Some(credential),
            SessionState::Hydrating | SessionState::Unauthenticated => None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            SessionState::Authenticated { profile, .. } => Some(profile),
            _ => None,
        }
    }
}

/// Owns the session and coordinates the token store, API client, and navigator.
pub struct SessionController {
    config: Config,
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    routes: RouteTable,
    state: watch::Sender<SessionState>,
    /// Bumped on every sign-in and sign-out; a bootstrap that started under
    /// an older epoch drops its result.
    epoch: AtomicU64,
}

impl SessionController {
    pub fn new(
        config: Config,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = ApiClient::new(&config, store.clone())?;
        let (state, _) = watch::channel(SessionState::Hydrating);

        Ok(Self {
            config,
            client,
            store,
            navigator,
            routes: RouteTable::storefront(),
            state,
            epoch: AtomicU64::new(0),
        })
    }

    /// Replace the route table consulted by [`visit`](Self::visit).
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Snapshot of the current session.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Wait until bootstrap has settled and return the resulting state.
    pub async fn wait_until_ready(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        let ready = rx.wait_for(|s| !s.is_loading()).await.map(|s| s.clone());
        ready.unwrap_or_else(|_| self.state())
    }

    /// Rebuild the session from the stored credential.
    ///
    /// Without a token the session becomes `Unauthenticated` and no request
    /// is made. With a token, the profile is fetched exactly once: success
    /// yields `Authenticated`, a 401 forces sign-out, and any other failure
    /// is logged and yields `TokenOnly`.
    pub async fn bootstrap(&self) -> SessionState {
        let epoch = self.epoch.load(Ordering::SeqCst);

        let credential = match self.store.read() {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                self.state.send_replace(SessionState::Unauthenticated);
                return self.state();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read token store; starting signed out");
                self.state.send_replace(SessionState::Unauthenticated);
                return self.state();
            }
        };

        self.state.send_replace(SessionState::Hydrating);

        let next = match self.client.get_json::<UserProfile>(PROFILE_ENDPOINT).await {
            Ok(profile) => {
                tracing::info!(role = %profile.role(), "Session restored");
                SessionState::Authenticated {
                    credential: credential.clone(),
                    profile,
                }
            }
            Err(ApiError::AuthExpired) => {
                // A 401 for a credential that was already replaced must not
                // clear its successor.
                if self.is_current(epoch, &credential) {
                    self.force_sign_out();
                } else {
                    tracing::debug!("Ignoring 401 from superseded bootstrap");
                }
                return self.state();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Profile fetch failed; continuing with token only");
                SessionState::TokenOnly {
                    credential: credential.clone(),
                }
            }
        };

        if !self.is_current(epoch, &credential) {
            tracing::debug!("Discarding superseded bootstrap result");
            return self.state();
        }

        self.state.send_replace(next);
        self.state()
    }

    /// Sign in and navigate to `return_to` (or the home page).
    pub async fn login(
        &self,
        request: &LoginRequest,
        return_to: Option<&str>,
    ) -> Result<SessionState> {
        request.validate()?;
        let response: AuthResponse = self.post_json(LOGIN_ENDPOINT, request).await?;
        self.sign_in(response, return_to).await
    }

    /// Create an account, sign in, and navigate like [`login`](Self::login).
    pub async fn register(
        &self,
        request: &RegisterRequest,
        return_to: Option<&str>,
    ) -> Result<SessionState> {
        request.validate()?;
        let response: AuthResponse = self.post_json(REGISTER_ENDPOINT, request).await?;
        self.sign_in(response, return_to).await
    }

    async fn sign_in(&self, response: AuthResponse, return_to: Option<&str>) -> Result<SessionState> {
        let credential = response.credential().ok_or(ApiError::MissingToken)?;
        self.store.save(&credential)?;
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let state = self.bootstrap().await;
        if state.is_present() {
            let target = return_to.unwrap_or(self.config.home_route.as_str());
            self.navigator.navigate(Location::push(target));
        }
        Ok(state)
    }

    /// Explicit sign-out.
    pub fn logout(&self) -> Result<()> {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.store.clear()?;
        self.state.send_replace(SessionState::Unauthenticated);
        self.navigator
            .navigate(Location::push(self.config.public_route.as_str()));
        tracing::info!("Signed out");
        Ok(())
    }

    /// Drop a session whose credential no longer matches the store.
    ///
    /// Returns true when the session was dropped.
    pub fn reconcile(&self) -> bool {
        let held = match self.state.borrow().credential() {
            Some(credential) => credential.clone(),
            None => return false,
        };

        let stored = self.store.read().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read token store during reconcile");
            None
        });

        if stored.as_ref() == Some(&held) {
            return false;
        }

        tracing::info!("Stored token changed outside the session; signing out");
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.state.send_replace(SessionState::Unauthenticated);
        true
    }

    /// Check access to `path` and perform any resulting redirect.
    pub fn visit(&self, path: &str) -> GateDecision {
        let state = self.state();

        let decision = match self.routes.resolve(path) {
            Some(Resolution::Matched(access)) => authorize(&state, access, path, &self.config),
            Some(Resolution::Fallback(_)) | None if state.is_loading() => GateDecision::Loading,
            Some(Resolution::Fallback(to)) => GateDecision::Redirect(Location::replace(to)),
            None => GateDecision::Redirect(Location::replace(self.config.public_route.as_str())),
        };

        if let GateDecision::Redirect(location) = &decision {
            self.navigator.navigate(location.clone());
        }
        decision
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call(self.client.get_json(path)).await
    }

    pub async fn get_json_with_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(self.client.get_json_with_query(path, query)).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(self.client.post_json(path, body)).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(self.client.put_json(path, body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.call(self.client.delete(path)).await
    }

    /// Run a client call, turning `AuthExpired` into a forced sign-out.
    /// The error is still returned to the caller.
    async fn call<T>(&self, request: impl Future<Output = Result<T>>) -> Result<T> {
        self.reconcile();

        match request.await {
            Err(ApiError::AuthExpired) => {
                self.force_sign_out();
                Err(ApiError::AuthExpired)
            }
            other => other,
        }
    }

    /// Clear the token, drop the session, and go to the login page.
    fn force_sign_out(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to clear token store after 401");
        }
        self.state.send_replace(SessionState::Unauthenticated);
        self.navigator
            .navigate(Location::replace(self.config.login_route.as_str()));
        tracing::info!("Session expired; redirected to login");
    }

    fn is_current(&self, epoch: u64, credential: &Credential) -> bool {
        if self.epoch.load(Ordering::SeqCst) != epoch {
            return false;
        }
        matches!(self.store.read(), Ok(Some(stored)) if &stored == credential)
    }
}
