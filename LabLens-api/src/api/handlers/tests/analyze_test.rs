#[cfg(test)]
mod analyze_tests {
    use axum::extract::{Json, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use lablens_domain::services::create_mock_analysis_service;
    use lablens_domain::testing::MockAnalysisOracle;

    use crate::api::handlers::analyze::{analyze_report, AnalysisService};
    use crate::entities::report::AnalyzeReportRequest;

    fn request() -> AnalyzeReportRequest {
        AnalyzeReportRequest {
            image: "aW1hZ2UtYnl0ZXM=".to_string(),
            image_type: "image/png".to_string(),
            age: 35,
            sex: "female".to_string(),
            language: "English".to_string(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_report_returns_success_shape() {
        let oracle = MockAnalysisOracle::new().with_completion(
            "Test Name: Hemoglobin\nValue: 13.5 g/dL\nRange: 12-16 g/dL\nStatus: Within Normal Range\nAdvice: Looks good.",
        );
        let service: AnalysisService = create_mock_analysis_service(oracle);

        let response = analyze_report(State(service), Json(request()))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["results"].as_array().unwrap().len(), 1);
        assert_eq!(body["results"][0]["name"], "Hemoglobin");
        assert_eq!(body["results"][0]["status"], "Within Normal Range");
    }

    #[tokio::test]
    async fn test_unusable_oracle_text_is_success_with_empty_results() {
        let oracle =
            MockAnalysisOracle::new().with_completion("I am unable to read this document.");
        let service: AnalysisService = create_mock_analysis_service(oracle);

        let response = analyze_report(State(service), Json(request()))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["results"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_missing_api_key_yields_uniform_failure_shape() {
        let oracle = MockAnalysisOracle::new().with_missing_key();
        let service: AnalysisService = create_mock_analysis_service(oracle);

        let response = analyze_report(State(service), Json(request()))
            .await
            .unwrap_err();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Missing Gemini API key");
        assert!(body.get("errorDetails").is_none());
    }

    #[tokio::test]
    async fn test_upstream_failure_carries_raw_body_in_error_details() {
        let oracle = MockAnalysisOracle::new()
            .with_upstream_failure(r#"{"error":{"code":429,"message":"Resource exhausted"}}"#);
        let service: AnalysisService = create_mock_analysis_service(oracle);

        let response = analyze_report(State(service), Json(request()))
            .await
            .unwrap_err();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Gemini API error");
        assert!(body["errorDetails"]
            .as_str()
            .unwrap()
            .contains("Resource exhausted"));
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_with_bad_request() {
        let oracle = MockAnalysisOracle::new().with_completion("Test Name: Glucose");
        let service: AnalysisService = create_mock_analysis_service(oracle);

        let mut bad_request = request();
        bad_request.image = String::new();

        let response = analyze_report(State(service), Json(bad_request))
            .await
            .unwrap_err();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Image data must not be empty"));
    }
}
