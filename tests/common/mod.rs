// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mock storefront backend for integration tests.
//!
//! Seeded accounts (password `secret`):
//! - `ana@example.com`   VENDEDOR       token `tok-123`
//! - `root@example.com`  ADMINISTRADOR  token `tok-admin`
//! - `luis@example.com`  COMPRADOR      token `tok-buyer`
//!
//! Any other bearer token is rejected with 401 by protected endpoints.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storefront_session::config::Config;
use storefront_session::models::Credential;
use storefront_session::navigation::HistoryNavigator;
use storefront_session::services::SessionController;
use storefront_session::store::{MemoryTokenStore, TokenStore};
use storefront_session::AppState;

#[derive(Clone)]
#[allow(dead_code)]
pub struct Account {
    pub id: u64,
    pub nombre: String,
    pub password: String,
    pub role: &'static str,
}

/// Recorded traffic and behaviour switches of the mock backend.
#[derive(Default)]
#[allow(dead_code)]
pub struct MockBackend {
    /// (path, raw Authorization header) per request, in arrival order
    pub requests: Mutex<Vec<(String, Option<String>)>>,
    pub profile_fetches: AtomicUsize,
    pub login_attempts: AtomicUsize,
    /// Make `usuarios/me` answer 500
    pub fail_profile: AtomicBool,
    /// Hold every `usuarios/me` response for this many milliseconds
    pub profile_delay_ms: AtomicU64,
    accounts: Mutex<HashMap<String, Account>>,
    tokens: Mutex<HashMap<String, String>>,
}

#[allow(dead_code)]
impl MockBackend {
    fn seeded() -> Self {
        let backend = Self::default();
        backend.add_account("ana@example.com", "Ana", "VENDEDOR", "tok-123");
        backend.add_account("root@example.com", "Root", "ADMINISTRADOR", "tok-admin");
        backend.add_account("luis@example.com", "Luis", "COMPRADOR", "tok-buyer");
        backend
    }

    fn add_account(&self, email: &str, nombre: &str, role: &'static str, token: &str) {
        let mut accounts = self.accounts.lock().unwrap();
        let id = accounts.len() as u64 + 1;
        accounts.insert(
            email.to_string(),
            Account {
                id,
                nombre: nombre.to_string(),
                password: "secret".to_string(),
                role,
            },
        );
        self.tokens
            .lock()
            .unwrap()
            .insert(token.to_string(), email.to_string());
    }

    fn record(&self, path: &str, headers: &HeaderMap) {
        let auth = headers
            .get(header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string());
        self.requests.lock().unwrap().push((path.to_string(), auth));
    }

    fn email_for(&self, headers: &HeaderMap) -> Option<String> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        self.tokens.lock().unwrap().get(token).cloned()
    }

    /// Authorization headers received for `path`.
    pub fn auth_headers_for(&self, path: &str) -> Vec<Option<String>> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, auth)| auth.clone())
            .collect()
    }

    pub fn profile_fetches(&self) -> usize {
        self.profile_fetches.load(Ordering::SeqCst)
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "mensaje": "Token inválido o expirado" })),
    )
        .into_response()
}

async fn login(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("/auth/login", &headers);
    backend.login_attempts.fetch_add(1, Ordering::SeqCst);

    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default();

    if email == "notoken@example.com" {
        return Json(json!({ "mensaje": "Bienvenido" })).into_response();
    }

    let valid = backend
        .accounts
        .lock()
        .unwrap()
        .get(&email)
        .map(|a| a.password == password)
        .unwrap_or(false);
    if !valid {
        return unauthorized();
    }

    let token = format!("tok-login-{}", email);
    backend.tokens.lock().unwrap().insert(token.clone(), email);
    Json(json!({ "token": token, "tipo": "Bearer" })).into_response()
}

async fn register(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    backend.record("/auth/registro", &headers);

    let email = body["email"].as_str().unwrap_or_default().to_string();
    if backend.accounts.lock().unwrap().contains_key(&email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "mensaje": "El email ya está registrado" })),
        )
            .into_response();
    }

    let role = match body["rolId"].as_u64() {
        Some(1) => "ADMINISTRADOR",
        Some(3) => "VENDEDOR",
        _ => "COMPRADOR",
    };
    let token = format!("tok-new-{}", email);
    let nombre = body["nombre"].as_str().unwrap_or_default().to_string();
    backend.add_account(&email, &nombre, role, &token);

    Json(json!({ "token": token })).into_response()
}

async fn me(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.record("/usuarios/me", &headers);
    backend.profile_fetches.fetch_add(1, Ordering::SeqCst);

    let delay = backend.profile_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let Some(email) = backend.email_for(&headers) else {
        return unauthorized();
    };
    if backend.fail_profile.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "mensaje": "Error interno" })),
        )
            .into_response();
    }

    let account = backend.accounts.lock().unwrap()[&email].clone();
    Json(json!({
        "id": account.id,
        "nombre": account.nombre,
        "email": email,
        "rol": { "nombre": account.role }
    }))
    .into_response()
}

async fn products(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.record("/productos", &headers);
    Json(json!({ "content": [{ "id": 1, "nombre": "Camisa" }], "filters": params }))
}

async fn delete_product(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> StatusCode {
    backend.record(&format!("/productos/{}", id), &headers);
    StatusCode::NO_CONTENT
}

async fn admin_users(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.record("/admin/usuarios", &headers);
    match backend.email_for(&headers) {
        Some(_) => Json(json!([{ "id": 1, "email": "root@example.com" }])).into_response(),
        None => unauthorized(),
    }
}

async fn order_status(
    State(backend): State<Arc<MockBackend>>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> StatusCode {
    backend.record(&format!("/admin/ordenes/{}/estado", id), &headers);
    StatusCode::OK
}

async fn expired(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.record("/expired", &headers);
    unauthorized()
}

async fn broken(State(backend): State<Arc<MockBackend>>, headers: HeaderMap) -> Response {
    backend.record("/broken", &headers);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "mensaje": "Error interno" })),
    )
        .into_response()
}

/// A running mock backend.
pub struct TestBackend {
    pub base_url: String,
    pub state: Arc<MockBackend>,
}

/// Start the mock backend on an ephemeral port.
pub async fn spawn_backend() -> TestBackend {
    let state = Arc::new(MockBackend::seeded());

    let api = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/registro", post(register))
        .route("/usuarios/me", get(me))
        .route("/productos", get(products))
        .route("/productos/{id}", delete(delete_product))
        .route("/admin/usuarios", get(admin_users))
        .route("/admin/ordenes/{id}/estado", put(order_status))
        .route("/expired", get(expired))
        .route("/broken", get(broken))
        .with_state(state.clone());
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestBackend {
        base_url: format!("http://{}/api/", addr),
        state,
    }
}

/// Session controller wired to a fresh mock backend.
#[allow(dead_code)]
pub struct Harness {
    pub backend: TestBackend,
    pub store: Arc<MemoryTokenStore>,
    pub navigator: Arc<HistoryNavigator>,
    pub app: AppState,
}

#[allow(dead_code)]
impl Harness {
    pub fn session(&self) -> &SessionController {
        &self.app.session
    }

    pub fn stored_token(&self) -> Option<String> {
        self.store.read().unwrap().map(Credential::into_inner)
    }
}

/// Build a harness, optionally with a token already stored (a "reload").
#[allow(dead_code)]
pub async fn harness(token: Option<&str>) -> Harness {
    let backend = spawn_backend().await;
    let config = Config::with_base_url(&backend.base_url).unwrap();

    let store = Arc::new(match token {
        Some(t) => MemoryTokenStore::with_token(Credential::parse(t).unwrap()),
        None => MemoryTokenStore::new(),
    });
    let navigator = Arc::new(HistoryNavigator::new());
    let app = AppState::new(config, store.clone(), navigator.clone()).unwrap();

    Harness {
        backend,
        store,
        navigator,
        app,
    }
}
