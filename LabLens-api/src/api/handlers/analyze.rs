use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, instrument, warn};
use validator::Validate;

// Import domain entities and services
use lablens_domain::entities::ReportAnalysisRequest;
use lablens_domain::services::{create_default_analysis_service, AnalysisError, AnalysisServiceTrait};

// Import our entities
use crate::entities::report::{AnalyzeErrorResponse, AnalyzeReportRequest, AnalyzeReportResponse};

/// Service type for dependency injection
pub type AnalysisService = Arc<dyn AnalysisServiceTrait + Send + Sync>;

/// Create a default service for the handlers to use
pub fn create_service() -> AnalysisService {
    create_default_analysis_service()
}

/// Analyze an uploaded lab report image
///
/// Forwards the image and patient context to the generative-language oracle
/// and returns the extracted test results. The extractor never fails: an
/// unusable oracle answer comes back as `success: true` with an empty
/// `results` array, and the client decides how to surface that.
#[utoipa::path(
    post,
    path = "/api/v1/analyze-report",
    request_body = AnalyzeReportRequest,
    responses(
        (status = 200, description = "Report analyzed", body = AnalyzeReportResponse),
        (status = 400, description = "Invalid request", body = AnalyzeErrorResponse),
        (status = 500, description = "Analysis failed", body = AnalyzeErrorResponse),
    ),
    tag = "analysis"
)]
#[instrument(skip(service, request))]
pub async fn analyze_report(
    State(service): State<AnalysisService>,
    Json(request): Json<AnalyzeReportRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, Response> {
    // Log the request context, never the image payload itself
    info!(
        age = request.age,
        sex = %request.sex,
        language = %request.language,
        image_type = %request.image_type,
        "Processing report analysis request"
    );

    if let Err(validation_errors) = request.validate() {
        let message = flatten_validation_errors(&validation_errors);
        warn!("Invalid analyze request: {}", message);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(AnalyzeErrorResponse::new(message)),
        )
            .into_response());
    }

    let domain_request = ReportAnalysisRequest {
        image: request.image,
        image_type: request.image_type,
        age: request.age,
        sex: request.sex,
        language: request.language,
    };

    match service.analyze_report(domain_request).await {
        Ok(results) => {
            info!("Report analysis produced {} results", results.len());
            Ok((
                StatusCode::OK,
                Json(AnalyzeReportResponse {
                    success: true,
                    results,
                }),
            ))
        }
        Err(e) => {
            error!("Error in report analysis: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(error_response_for(e)),
            )
                .into_response())
        }
    }
}

/// Convert a service error into the uniform failure shape, keeping the
/// upstream body text in `errorDetails` rather than the top-level message
fn error_response_for(error: AnalysisError) -> AnalyzeErrorResponse {
    match error {
        AnalysisError::Configuration => AnalyzeErrorResponse::new("Missing Gemini API key"),
        AnalysisError::Upstream(body) => {
            AnalyzeErrorResponse::with_details("Gemini API error", body)
        }
        AnalysisError::Transport(message) => {
            AnalyzeErrorResponse::with_details("Gemini API request failed", message)
        }
        AnalysisError::EmptyCompletion => {
            AnalyzeErrorResponse::new("Gemini API returned no analysis text")
        }
    }
}

/// Join validator output into one human-readable message
fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let error_msgs: Vec<String> = errors
                .iter()
                .map(|err| {
                    if let Some(msg) = &err.message {
                        msg.to_string()
                    } else {
                        format!("Invalid {}", field)
                    }
                })
                .collect();
            format!("{}: {}", field, error_msgs.join(", "))
        })
        .collect::<Vec<String>>()
        .join("; ")
}
