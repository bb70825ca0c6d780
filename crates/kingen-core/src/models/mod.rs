//! Data models for the application
//!
//! Request-scoped upload records, resolved option records, and the generation
//! result returned by the orchestrator.

mod generation;
mod options;
mod upload;

pub use generation::*;
pub use options::*;
pub use upload::*;
