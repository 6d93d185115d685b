use std::path::PathBuf;

use thiserror::Error;

pub mod file;
pub mod traits;

// Re-export
pub use file::FileStore;
pub use traits::SnapshotStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored snapshot at '{path}' is corrupt: {detail}")]
    Corrupt { path: PathBuf, detail: String },

    #[error("failed to write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize snapshot: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },
}
