pub mod analyze;
pub mod health;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use analyze::analyze_report;
pub use health::health_check;
