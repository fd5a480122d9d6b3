//=========================================================================
// File System Context
//=========================================================================
//
// Host-provided asset access and storage roots handed to the native core
// exactly once, before the first lifecycle event.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

//=== Internal Dependencies ===============================================

use super::errors::BridgeError;

//=== AssetReader =========================================================

/// Read-only access to assets bundled with the application.
///
/// Names are relative, slash-separated paths inside the bundle.
pub trait AssetReader: Send + Sync {
    /// Reads the whole asset into memory.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

//=== DirectoryAssets =====================================================

/// Asset reader backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetReader for DirectoryAssets {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset name escapes bundle root: {}", name),
            ));
        }

        std::fs::read(self.root.join(relative))
    }
}

//=== FileSystemContext ===================================================

/// Everything the native core needs to reach files.
///
/// - `assets`: bundled read-only assets
/// - `local_path`: private writable storage (absolute)
/// - `external_path`: shared external storage (absolute)
#[derive(Clone)]
pub struct FileSystemContext {
    assets: Arc<dyn AssetReader>,
    local_path: PathBuf,
    external_path: PathBuf,
}

impl FileSystemContext {
    /// Creates the context, rejecting relative storage roots.
    pub fn new(
        assets: Arc<dyn AssetReader>,
        local_path: impl Into<PathBuf>,
        external_path: impl Into<PathBuf>,
    ) -> Result<Self, BridgeError> {
        let local_path = local_path.into();
        let external_path = external_path.into();

        for path in [&local_path, &external_path] {
            if !path.is_absolute() {
                return Err(BridgeError::RelativeStoragePath(path.clone()));
            }
        }

        Ok(Self {
            assets,
            local_path,
            external_path,
        })
    }

    pub fn assets(&self) -> &dyn AssetReader {
        self.assets.as_ref()
    }

    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    pub fn external_path(&self) -> &Path {
        &self.external_path
    }
}

impl fmt::Debug for FileSystemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSystemContext")
            .field("local_path", &self.local_path)
            .field("external_path", &self.external_path)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
