//! Terratrek Server - Travel Booking Platform
//!
//! REST API server for the Terratrek travel platform.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use terratrek_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("terratrek_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Terratrek Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(
        repository,
        config.auth.clone(),
        config.email.clone(),
        config.booking.clone(),
        config.newsletter.clone(),
    );

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

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Public catalog
        .route("/tours", get(api::tours::get_tours))
        .route("/experts", get(api::experts::get_experts))
        .route("/experts/profile", get(api::experts::get_expert_profile))
        // Bookings
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings", get(api::bookings::get_booking))
        // Consultation code redemption
        .route(
            "/consultation-codes/redeem",
            post(api::consultation_codes::redeem_code),
        )
        // Newsletter
        .route("/newsletter/subscribe", post(api::newsletter::subscribe))
        .route("/newsletter/confirm", post(api::newsletter::confirm))
        // Admin authentication
        .route("/admin/auth/login", post(api::admin::auth::login))
        .route("/admin/auth/me", get(api::admin::auth::me))
        // Admin tours
        .route("/admin/tours", get(api::admin::tours::list_tours))
        .route("/admin/tours", post(api::admin::tours::create_tour))
        .route("/admin/tours/:id", get(api::admin::tours::get_tour))
        .route("/admin/tours/:id", put(api::admin::tours::update_tour))
        .route("/admin/tours/:id", delete(api::admin::tours::delete_tour))
        // Admin experts
        .route("/admin/experts", get(api::admin::experts::list_experts))
        .route("/admin/experts", post(api::admin::experts::create_expert))
        .route("/admin/experts/:id", get(api::admin::experts::get_expert))
        .route("/admin/experts/:id", put(api::admin::experts::update_expert))
        .route("/admin/experts/:id", delete(api::admin::experts::delete_expert))
        .route(
            "/admin/experts/:id/featured-tours",
            get(api::admin::experts::get_featured_tours),
        )
        .route(
            "/admin/experts/:id/featured-tours",
            put(api::admin::experts::set_featured_tours),
        )
        // Admin categories
        .route("/admin/categories", get(api::admin::categories::list_categories))
        .route("/admin/categories", post(api::admin::categories::create_category))
        .route("/admin/categories/:id", get(api::admin::categories::get_category))
        .route("/admin/categories/:id", put(api::admin::categories::update_category))
        .route("/admin/categories/:id", patch(api::admin::categories::patch_category))
        .route("/admin/categories/:id", delete(api::admin::categories::delete_category))
        // Admin consultation codes
        .route(
            "/admin/consultation-codes",
            get(api::admin::consultation_codes::list_codes),
        )
        .route(
            "/admin/consultation-codes",
            post(api::admin::consultation_codes::create_code),
        )
        .route(
            "/admin/consultation-codes/stats",
            get(api::admin::consultation_codes::code_stats),
        )
        .route(
            "/admin/consultation-codes/bulk",
            post(api::admin::consultation_codes::bulk_create_codes),
        )
        .route(
            "/admin/consultation-codes/bulk-update",
            post(api::admin::consultation_codes::bulk_update_codes),
        )
        .route(
            "/admin/consultation-codes/export",
            get(api::admin::consultation_codes::export_codes),
        )
        .route(
            "/admin/consultation-codes/:id",
            get(api::admin::consultation_codes::get_code),
        )
        .route(
            "/admin/consultation-codes/:id",
            put(api::admin::consultation_codes::update_code),
        )
        .route(
            "/admin/consultation-codes/:id",
            delete(api::admin::consultation_codes::delete_code),
        )
        // Admin tour leaders
        .route("/admin/tour-leaders", get(api::admin::tour_leaders::list_tour_leaders))
        .route("/admin/tour-leaders", post(api::admin::tour_leaders::create_tour_leader))
        .route("/admin/tour-leaders/:id", get(api::admin::tour_leaders::get_tour_leader))
        .route("/admin/tour-leaders/:id", put(api::admin::tour_leaders::update_tour_leader))
        .route("/admin/tour-leaders/:id", delete(api::admin::tour_leaders::delete_tour_leader))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api_routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
