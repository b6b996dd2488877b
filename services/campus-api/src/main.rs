//! Campus API
//!
//! Course-platform service enforcing a single live session per account and
//! tracking idempotent course progress.
//!
//! ## REST Endpoints
//!
//! - `POST /api/v1/register` - Create an account
//! - `POST /api/v1/login` - Issue a token (retires earlier tokens)
//! - `POST /api/v1/logout` - Retire every token of the caller
//! - `GET /api/v1/me` - Caller identity
//! - `POST /api/v1/enroll` - Enroll in a course
//! - `GET /api/v1/my-courses` - Enrollments with progress
//! - `POST /api/v1/progress` - Record a completion event
//! - `GET /api/v1/progress/{course_id}` - Read progress
//!
//! ## Health Endpoints
//!
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe

mod config;
mod error;
mod extractors;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use campus_auth_core::AccountService;
use campus_db::{PoolOptions, Repositories};
use campus_progress_core::ProgressEngine;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::handlers::{health, ready};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("campus_api=debug".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Campus API");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        http_port = config.http_port,
        token_ttl_secs = config.auth.token_ttl.as_secs(),
        "Configuration loaded"
    );

    // Create database pool and bring the schema up to date
    let pool = campus_db::create_pool_with_options(
        &config.database_url,
        PoolOptions {
            max_connections: config.database_max_connections,
            ..PoolOptions::default()
        },
    )
    .await?;
    campus_db::run_migrations(&pool).await?;
    tracing::info!("Database ready");

    // Create repositories and services
    let repos = Repositories::new(pool.clone());

    let auth = AccountService::new(config.auth.clone(), Arc::new(repos.accounts.clone()))?;
    if let Some(admin) = &config.admin {
        auth.bootstrap_admin(&admin.username, &admin.password).await?;
    }

    let progress = ProgressEngine::new(
        config.progress.clone(),
        Arc::new(repos.enrollments.clone()),
        Arc::new(repos.courses.clone()),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let state = AppState::new(auth, progress, pool, config);
    let app = build_router(state);

    tracing::info!("HTTP server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout();

    let api_v1 = Router::new()
        // Accounts
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::me))
        // Enrollment and progress
        .route("/enroll", post(handlers::enroll))
        .route("/my-courses", get(handlers::my_courses))
        .route("/progress", post(handlers::update_progress))
        .route("/progress/{course_id}", get(handlers::get_progress));

    // Health routes (no timeout - must always respond quickly)
    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready));

    // Middleware stack (outermost first)
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .nest("/api/v1", api_v1)
        .layer(middleware)
        .merge(health_routes)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
