//! Equipment Inventory Service
//!
//! A Rust REST API server for equipment stock and reservations,
//! backed by a DynamoDB table.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use aws_config::{meta::region::RegionProviderChain, timeout::TimeoutConfig, BehaviorVersion};
use aws_sdk_dynamodb::config::Region;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equipment_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("equipment_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting equipment server v{}", env!("CARGO_PKG_VERSION"));

    // Build the store client handle shared by all requests
    let client = build_store_client(&config).await;
    tracing::info!(table = %config.dynamodb.table, "Store client initialized");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(client, config.dynamodb.table.clone());
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Construct the DynamoDB client. Explicit operation and attempt timeouts
/// keep a hung store call from hanging its request.
async fn build_store_client(config: &AppConfig) -> aws_sdk_dynamodb::Client {
    let region = RegionProviderChain::first_try(config.dynamodb.region.clone().map(Region::new))
        .or_default_provider()
        .or_else(Region::new("us-east-1"));

    let timeouts = TimeoutConfig::builder()
        .operation_timeout(Duration::from_secs(config.dynamodb.timeout_secs))
        .operation_attempt_timeout(Duration::from_secs(config.dynamodb.timeout_secs))
        .build();

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .timeout_config(timeouts);
    if let Some(endpoint) = &config.dynamodb.endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    aws_sdk_dynamodb::Client::new(&loader.load().await)
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment
        .route("/equipments", get(api::equipment::list_equipments))
        .route("/equipments/ids", get(api::equipment::get_equipments_by_ids))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        // Stock adjustments
        .route(
            "/equipment/onReserveWorkspace",
            post(api::equipment::reserve_equipment),
        )
        .route(
            "/equipment/onCancelReserve",
            post(api::equipment::cancel_reserve_equipment),
        )
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(api::openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
