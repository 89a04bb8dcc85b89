/// Health check payload.
pub mod health;
pub mod round;
pub mod validation;
/// Standalone word payloads.
pub mod word;
