use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::entities::{ReportAnalysisRequest, TestResult};
use crate::services::extractor::extract_test_results;
use crate::services::gemini::GeminiClient;
use crate::services::oracle::{AnalysisOracle, OracleError, OracleRequest};
use crate::services::prompt::build_analysis_prompt;

/// Report analysis service errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Configuration error: no API key available
    #[error("Missing Gemini API key")]
    Configuration,

    /// The oracle returned a non-success response; carries its raw body text
    #[error("Gemini API error: {0}")]
    Upstream(String),

    /// The oracle could not be reached at all
    #[error("Gemini API request failed: {0}")]
    Transport(String),

    /// The oracle replied successfully but produced no text to extract from
    #[error("Gemini API returned no analysis text")]
    EmptyCompletion,
}

/// Trait for report analysis operations
#[async_trait]
pub trait AnalysisServiceTrait: Send + Sync {
    /// Analyze one uploaded report image.
    ///
    /// Returns the extracted records in source order. An empty vector is a
    /// successful outcome — the extractor degrades rather than fails, and it
    /// is the caller's decision how to surface "no results found".
    async fn analyze_report(
        &self,
        request: ReportAnalysisRequest,
    ) -> Result<Vec<TestResult>, AnalysisError>;
}

/// Report analysis service: prompt construction, one oracle call, extraction.
pub struct AnalysisService<O: AnalysisOracle> {
    oracle: O,
}

impl<O: AnalysisOracle> AnalysisService<O> {
    /// Create a new analysis service backed by the given oracle
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Map oracle errors to service errors
    fn map_oracle_error(&self, err: OracleError) -> AnalysisError {
        match err {
            OracleError::MissingApiKey => AnalysisError::Configuration,
            OracleError::Upstream(body) => AnalysisError::Upstream(body),
            OracleError::Transport(msg) => AnalysisError::Transport(msg),
            OracleError::EmptyCompletion => AnalysisError::EmptyCompletion,
        }
    }
}

#[async_trait]
impl<O: AnalysisOracle> AnalysisServiceTrait for AnalysisService<O> {
    async fn analyze_report(
        &self,
        request: ReportAnalysisRequest,
    ) -> Result<Vec<TestResult>, AnalysisError> {
        let prompt = build_analysis_prompt(request.age, &request.sex, &request.language);

        let oracle_request = OracleRequest {
            prompt,
            image_base64: request.image,
            image_mime: request.image_type,
        };

        let analysis_text = self
            .oracle
            .complete(&oracle_request)
            .await
            .map_err(|e| self.map_oracle_error(e))?;

        let results = extract_test_results(&analysis_text);
        if results.is_empty() {
            warn!("Extraction produced no test results from oracle text");
        } else {
            info!("Extracted {} test results", results.len());
        }

        Ok(results)
    }
}

/// Create the default analysis service, backed by the Gemini client
/// configured from the environment.
pub fn create_default_analysis_service() -> Arc<dyn AnalysisServiceTrait + Send + Sync> {
    Arc::new(AnalysisService::new(GeminiClient::from_env()))
}

/// Create an analysis service backed by a mock oracle, for tests.
#[cfg(feature = "mock")]
pub fn create_mock_analysis_service(
    oracle: crate::testing::MockAnalysisOracle,
) -> Arc<dyn AnalysisServiceTrait + Send + Sync> {
    Arc::new(AnalysisService::new(oracle))
}
