// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Gateway Service
//!
//! Serves the portfolio site's contact form endpoint:
//!
//! - `POST /contact` — gated, validated, sanitized, rate-limited submission
//! - `GET /health`, `GET /healthz` — liveness
//! - `GET /metrics` — Prometheus metrics (config-gated)
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `SITE_DOMAIN`: Domain referrers must match (default: portfolio.example.com)
//! - `RATE_LIMIT_MAX`: Max requests per window per client (default: 5)
//! - `RATE_WINDOW_SECS`: Window length in seconds (default: 60)
//! - `MAX_TRACKED_KEYS`: Tracked clients before LRU eviction (default: 500)
//! - `TARPIT_DELAY_MS`: Uniform anti-automation delay (default: 500)

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use contact_gateway::{
    config::Config,
    delivery::LogDelivery,
    handlers::{self, AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        site_domain = %config.site_domain,
        max_requests = config.rate_limit.max_requests,
        window_secs = config.rate_limit.window_secs,
        max_tracked_keys = config.rate_limit.max_tracked_keys,
        tarpit_delay_ms = config.security.tarpit_delay_ms,
        "Starting contact gateway"
    );

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), Arc::new(LogDelivery))?);

    // Browsers only reach this API from the site itself
    let site_origin = format!("https://{}", config.site_domain);
    let cors = CorsLayer::new()
        .allow_origin(site_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .route("/healthz", get(handlers::health))
        .route(
            "/contact",
            get(handlers::method_not_allowed).post(handlers::contact),
        );
    if config.metrics.enabled {
        app = app.route(&config.metrics.path, get(handlers::metrics));
    }
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    let defaults = Config::default();
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
        site_domain: std::env::var("SITE_DOMAIN").unwrap_or(defaults.site_domain),
        rate_limit: contact_gateway::config::RateLimitConfig {
            max_requests: env_parse("RATE_LIMIT_MAX", defaults.rate_limit.max_requests),
            window_secs: env_parse("RATE_WINDOW_SECS", defaults.rate_limit.window_secs),
            max_tracked_keys: env_parse("MAX_TRACKED_KEYS", defaults.rate_limit.max_tracked_keys),
        },
        validation: defaults.validation,
        security: contact_gateway::config::SecurityConfig {
            tarpit_delay_ms: env_parse("TARPIT_DELAY_MS", defaults.security.tarpit_delay_ms),
            blocked_user_agents: defaults.security.blocked_user_agents,
        },
        metrics: defaults.metrics,
    }
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
