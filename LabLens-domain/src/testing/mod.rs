// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

use std::sync::Mutex;

use async_trait::async_trait;

use crate::services::oracle::{AnalysisOracle, OracleError, OracleRequest};

/// Mock implementation of the [`AnalysisOracle`] trait for testing.
///
/// Configured with a canned completion or a canned failure; records every
/// request it receives so tests can assert on the prompt and image payload.
pub struct MockAnalysisOracle {
    completion: Option<String>,
    failure: Option<MockFailure>,
    requests: Mutex<Vec<OracleRequest>>,
}

enum MockFailure {
    MissingApiKey,
    Upstream(String),
    Transport(String),
}

impl Default for MockAnalysisOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAnalysisOracle {
    /// Create a new mock oracle. With no further configuration it answers
    /// every request with an empty completion error.
    pub fn new() -> Self {
        Self {
            completion: None,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Configure the mock to answer with the given text
    pub fn with_completion(mut self, text: impl Into<String>) -> Self {
        self.completion = Some(text.into());
        self.failure = None;
        self
    }

    /// Configure the mock to fail as if the API key were absent
    pub fn with_missing_key(mut self) -> Self {
        self.failure = Some(MockFailure::MissingApiKey);
        self
    }

    /// Configure the mock to fail with an upstream error body
    pub fn with_upstream_failure(mut self, body: impl Into<String>) -> Self {
        self.failure = Some(MockFailure::Upstream(body.into()));
        self
    }

    /// Configure the mock to fail as if the network were unreachable
    pub fn with_transport_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(MockFailure::Transport(message.into()));
        self
    }

    /// The requests this mock has received so far
    pub fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisOracle for MockAnalysisOracle {
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(failure) = &self.failure {
            return Err(match failure {
                MockFailure::MissingApiKey => OracleError::MissingApiKey,
                MockFailure::Upstream(body) => OracleError::Upstream(body.clone()),
                MockFailure::Transport(msg) => OracleError::Transport(msg.clone()),
            });
        }

        match &self.completion {
            Some(text) => Ok(text.clone()),
            None => Err(OracleError::EmptyCompletion),
        }
    }
}
