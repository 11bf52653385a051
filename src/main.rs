// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storefront command-line client
//!
//! Each invocation behaves like a page load: the session is restored from
//! the stored token before the command runs.

use clap::{Parser, Subcommand};
use std::sync::Arc;
use storefront_session::{
    config::Config,
    middleware::GateDecision,
    models::{LoginRequest, RegisterRequest, Role},
    navigation::{HistoryNavigator, Location, Navigator},
    services::SessionState,
    store::FileTokenStore,
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Storefront API client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD")]
        password: String,
        /// Page to return to after signing in
        #[arg(long)]
        from: Option<String>,
    },
    /// Create an account and sign in
    Register {
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD")]
        password: String,
        #[arg(long, default_value = "COMPRADOR")]
        role: Role,
    },
    /// Forget the stored token
    Logout,
    /// Show the restored session
    Whoami,
    /// Check whether the session may open a page
    Visit { path: String },
    /// GET an API endpoint and print the JSON response
    Get { path: String },
}

/// Prints navigations as they happen.
struct PrintNavigator(HistoryNavigator);

impl Navigator for PrintNavigator {
    fn navigate(&self, location: Location) {
        println!("-> {}", location.href());
        self.0.navigate(location);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    tracing::debug!(api = %config.api_base_url, "Starting storefront client");

    let store = Arc::new(FileTokenStore::new(&config.token_path));
    let navigator = Arc::new(PrintNavigator(HistoryNavigator::new()));
    let app = AppState::new(config, store, navigator)?;
    let session = &app.session;

    session.bootstrap().await;

    match cli.command {
        Command::Login {
            email,
            password,
            from,
        } => {
            let state = session
                .login(&LoginRequest { email, password }, from.as_deref())
                .await?;
            print_state(&state);
        }
        Command::Register {
            nombre,
            email,
            password,
            role,
        } => {
            let request = RegisterRequest::with_role(&nombre, &email, &password, role);
            let state = session.register(&request, None).await?;
            print_state(&state);
        }
        Command::Logout => session.logout()?,
        Command::Whoami => print_state(&session.state()),
        Command::Visit { path } => match session.visit(&path) {
            GateDecision::Render => println!("allowed: {}", path),
            GateDecision::Loading => println!("loading"),
            GateDecision::Redirect(_) => {}
        },
        Command::Get { path } => {
            let body: serde_json::Value = session.get_json(&path).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}

fn print_state(state: &SessionState) {
    match state {
        SessionState::Hydrating => println!("session: loading"),
        SessionState::Unauthenticated => println!("session: signed out"),
        SessionState::TokenOnly { .. } => println!("session: signed in (profile unavailable)"),
        SessionState::Authenticated { profile, .. } => {
            println!(
                "session: {} <{}> [{}]",
                profile.nombre.as_deref().unwrap_or("-"),
                profile.email.as_deref().unwrap_or("-"),
                profile.role()
            );
            println!("dashboard: {}", profile.role().dashboard_section());
        }
    }
}

/// Initialize structured JSON logging on stderr.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_writer(std::io::stderr)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("storefront_session=info,warn"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
