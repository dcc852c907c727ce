//! DataForge API Gateway
//!
//! HTTP entry point for related-dataset lookups.
//! Handles:
//! - Request routing
//! - Query validation
//! - Observability (logging, metrics, request IDs)

mod handlers;

use axum::{routing::get, Router};
use dataforge_common::{
    config::{AppConfig, ObservabilityConfig},
    db::DbPool,
    metrics,
};
use dataforge_recommend::{RecommendationService, SeaOrmCandidateSource};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub recommendations: Arc<RecommendationService>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize tracing
    init_tracing(&config.observability);

    info!(
        service = %config.observability.service_name,
        "Starting DataForge API Gateway v{}",
        dataforge_common::VERSION
    );

    // Initialize metrics
    if config.observability.metrics_port != 0 {
        let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.observability.metrics_port));
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                metrics::LATENCY_BUCKETS,
            )?
            .set_buckets_for_metric(
                Matcher::Full(format!("{}_recommendation_candidates", metrics::METRICS_PREFIX)),
                metrics::CANDIDATE_BUCKETS,
            )?
            .install()?;
        info!("Prometheus exporter listening on {}", metrics_addr);
    }
    metrics::register_metrics();

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;

    let source = Arc::new(SeaOrmCandidateSource::new(db.clone()));
    let recommendations = RecommendationService::from_config(source, &config.recommendation)?;

    // Create app state
    let state = AppState {
        config: config.clone(),
        db,
        recommendations: Arc::new(recommendations),
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing(observability: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if observability.json_logging {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))

        // Dataset endpoints
        .route("/datasets/{id}/related", get(handlers::datasets::get_related));

    let timeout = TimeoutLayer::new(state.config.request_timeout());

    // Compose the app
    Router::new()
        .nest("/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(request_id)
                .layer(TraceLayer::new_for_http())
                .layer(propagate_id)
                .layer(cors)
                .layer(timeout),
        )
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
