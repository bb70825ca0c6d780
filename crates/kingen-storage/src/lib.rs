//! Artifact store for generated images.
//!
//! Generated artifacts are named binary blobs addressed by filename, written
//! once as a side effect of generation and never mutated afterwards. Filenames
//! are opaque single path segments; the store resolves them against a single
//! configured root directory and rejects anything that would escape it.

mod local;
mod traits;

pub use local::LocalArtifactStore;
pub use traits::{ArtifactInfo, ArtifactStore, StorageError, StorageResult};
