use axum::{
    http::{header, HeaderName, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use crate::api::handlers::{analyze, health};
use crate::openapi::configure_swagger_routes;

type AppState = analyze::AnalysisService;

/// Create the application router with the default (environment-configured)
/// analysis service
pub async fn create_app() -> Router {
    debug!("Creating application router");

    // Create the analysis service using the factory function
    let analysis_service = analyze::create_service();

    create_app_with_service(analysis_service)
}

/// Create the application router around an explicit analysis service.
///
/// Tests use this to swap in a mock oracle without touching the environment.
pub fn create_app_with_service(analysis_service: AppState) -> Router {
    // Create health service using factory function
    let health_service = health::create_health_service();

    // The browser client calls this API from any origin; preflight OPTIONS
    // requests are answered by the CORS layer with an empty body.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    // Set up API routes
    let api_routes = Router::new().route("/analyze-report", post(analyze::analyze_report));

    debug!("API routes configured");

    // Set up public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    debug!("Public routes configured");

    // Combine all routes
    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .with_state(analysis_service)
        .layer(cors);

    debug!("Routes merged");

    // Configure the Swagger UI using the helper function
    let app = add_swagger_ui(app);

    debug!("Swagger UI merged");

    // Initialize health check service startup time
    health::initialize_server_start_time();
    debug!("Health check service initialized");

    app
}

/// Add Swagger UI to the router
pub fn add_swagger_ui(app: Router) -> Router {
    // Get Swagger UI routes
    let swagger = configure_swagger_routes();

    // Merge Swagger UI with the app router
    app.merge(swagger)
}
