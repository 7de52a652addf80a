pub mod analysis;
pub mod extractor;
pub mod gemini;
pub mod oracle;
pub mod prompt;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use analysis::{create_default_analysis_service, AnalysisError, AnalysisServiceTrait};
pub use extractor::extract_test_results;
pub use oracle::{AnalysisOracle, OracleError, OracleRequest};

// Re-export mock service factory functions when the mock feature is enabled
#[cfg(feature = "mock")]
pub use analysis::create_mock_analysis_service;
