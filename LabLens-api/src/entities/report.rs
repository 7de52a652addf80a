use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use lablens_domain::entities::TestResult;

/// Request payload for analyzing an uploaded report image
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AnalyzeReportRequest {
    /// Base64-encoded image bytes
    #[validate(length(min = 1, message = "Image data must not be empty"))]
    pub image: String,

    /// MIME type of the uploaded image (e.g. "image/png")
    #[serde(rename = "imageType")]
    #[validate(custom = "validate_image_mime")]
    pub image_type: String,

    /// Patient age in years
    #[validate(range(max = 130, message = "Age must be between 0 and 130"))]
    pub age: u32,

    /// Patient sex, interpolated into the prompt verbatim
    #[validate(length(min = 1, message = "Sex must not be empty"))]
    pub sex: String,

    /// Language the advice should be written in
    #[validate(length(min = 1, message = "Language must not be empty"))]
    pub language: String,
}

fn validate_image_mime(mime: &str) -> Result<(), validator::ValidationError> {
    if mime.starts_with("image/") {
        Ok(())
    } else {
        Err(validator::ValidationError::new("image_mime"))
    }
}

/// Successful analysis response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeReportResponse {
    /// Always true on this shape
    pub success: bool,

    /// Extracted test results in source order; may be empty when the
    /// oracle's text contained nothing extractable
    pub results: Vec<TestResult>,
}

/// Uniform failure response shape
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeErrorResponse {
    /// Always false on this shape
    pub success: bool,

    /// Human-readable error message
    pub error: String,

    /// Optional additional detail (e.g. the upstream response body)
    #[serde(rename = "errorDetails", skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl AnalyzeErrorResponse {
    /// Build a failure response from a message, with no extra detail
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_details: None,
        }
    }

    /// Build a failure response carrying additional detail
    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            error_details: Some(details.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> AnalyzeReportRequest {
        AnalyzeReportRequest {
            image: "aW1hZ2UtYnl0ZXM=".to_string(),
            image_type: "image/png".to_string(),
            age: 35,
            sex: "female".to_string(),
            language: "English".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_empty_image_fails_validation() {
        let mut request = valid_request();
        request.image = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_non_image_mime_fails_validation() {
        let mut request = valid_request();
        request.image_type = "application/pdf".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_request_accepts_camel_case_image_type() {
        let json = r#"{"image":"QUJD","imageType":"image/jpeg","age":40,"sex":"male","language":"French"}"#;
        let request: AnalyzeReportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.image_type, "image/jpeg");
    }

    #[test]
    fn test_error_response_omits_absent_details() {
        let body = serde_json::to_value(AnalyzeErrorResponse::new("boom")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "boom");
        assert!(body.get("errorDetails").is_none());
    }

    #[test]
    fn test_error_response_renames_details_field() {
        let body =
            serde_json::to_value(AnalyzeErrorResponse::with_details("boom", "stack")).unwrap();
        assert_eq!(body["errorDetails"], "stack");
    }
}
