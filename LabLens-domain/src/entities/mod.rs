// Domain entities for the LabLens application
// These structures cross the domain boundary and are serialized as-is

// Test result records extracted from an analyzed report
pub mod report;

// Re-export the core entities
pub use report::{ReportAnalysisRequest, TestResult};
