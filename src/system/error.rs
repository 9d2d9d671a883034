use std::path::PathBuf;

use thiserror::Error;

/// Failure of a whole collection pass.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("no filesystem is mounted at {}", .mount_point.display())]
    RootFilesystemUnavailable { mount_point: PathBuf },

    #[error("filesystem at {} reports a total size of zero", .mount_point.display())]
    EmptyFilesystem { mount_point: PathBuf },

    #[error("{0}")]
    Provider(String),
}
