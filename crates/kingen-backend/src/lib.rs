//! Generation backend client.
//!
//! The pixel work is delegated to an external generative-image service; this
//! crate defines the backend contract (`GenerationBackend`) and the Gemini
//! HTTP implementation. A single best-effort call per request, no retry:
//! callers needing retry resubmit the whole generation request.

mod gemini;
mod traits;

pub use gemini::GeminiBackend;
pub use traits::{BackendError, BackendOutput, GenerationBackend};
