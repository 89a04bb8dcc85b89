/// Completion backends used to generate secret words.
pub mod generator;
/// Per-client round session storage.
pub mod session_store;
