//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;

use async_trait::async_trait;

use crate::services::gemini::API_KEY_ENV;

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check whether the analysis oracle is usable
    /// Returns true if the oracle is configured, false if its configuration
    /// looks incomplete, and an error if it is unusable
    async fn check_oracle_status(&self) -> Result<bool, String>;
}

/// Check whether the analysis oracle can be called at all.
///
/// There is no cheap liveness probe for the hosted API, so this only checks
/// that the key is configured:
/// - Ok(true) if the API key is present
/// - Ok(false) if the variable exists but is empty
/// - Err if the key is absent entirely
pub fn check_oracle_status() -> Result<bool, String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(true),
        Ok(_) => Ok(false),
        Err(_) => Err(format!("{} is not configured", API_KEY_ENV)),
    }
}

/// Get overall system health
pub async fn get_system_health() -> SystemHealth {
    let oracle_status = check_oracle_status();

    let oracle_component = match oracle_status {
        Ok(true) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        Ok(false) => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Gemini API key is configured but empty".to_string()),
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    };

    let overall_status = if oracle_component.status == ComponentStatus::Unhealthy {
        SystemStatus::Unhealthy
    } else if oracle_component.status == ComponentStatus::Degraded {
        SystemStatus::Degraded
    } else {
        SystemStatus::Healthy
    };

    SystemHealth {
        status: overall_status,
        components: vec![("oracle".to_string(), oracle_component)]
            .into_iter()
            .collect(),
    }
}
