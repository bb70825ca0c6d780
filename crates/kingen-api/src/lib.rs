//! Kingen API Library
//!
//! This crate provides the HTTP API handlers, request intake, generation
//! orchestration, and application setup.

// Module declarations
mod api_doc;
mod handlers;
mod intake;
mod keep_alive;
mod services;
mod telemetry;

// Public modules
pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
