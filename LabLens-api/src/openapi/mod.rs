use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Report analysis endpoints
        crate::api::handlers::analyze::analyze_report,
    ),
    components(
        schemas(
            // Entities
            crate::entities::report::AnalyzeReportRequest,
            crate::entities::report::AnalyzeReportResponse,
            crate::entities::report::AnalyzeErrorResponse,
            lablens_domain::entities::TestResult,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "analysis", description = "Lab report analysis endpoints")
    ),
    info(
        title = "LabLens API",
        version = "0.1.0",
        description = "API for analyzing lab report images and returning structured results with dietary and lifestyle advice",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
