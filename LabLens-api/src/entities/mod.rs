// Public entities for the LabLens API
// This module contains data structures that cross the application boundary

// Report analysis request/response shapes
pub mod report;
