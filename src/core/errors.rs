//=========================================================================
// Bridge Errors
//=========================================================================
//
// Setup-time failures. Runtime paths (events, commands, queries) never
// fail; they degrade to no-ops or default values instead.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

//=== BridgeError =========================================================

/// Errors raised while wiring the bridge to the native core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// `init_file_system` was called more than once for this native core.
    FileSystemAlreadyInitialized,

    /// A storage root handed to the native core was not absolute.
    RelativeStoragePath(PathBuf),
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileSystemAlreadyInitialized => {
                write!(f, "Native file system already initialized")
            }
            Self::RelativeStoragePath(path) => {
                write!(f, "Storage path must be absolute: {}", path.display())
            }
        }
    }
}

impl std::error::Error for BridgeError {}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<BridgeError>();
    }

    #[test]
    fn display_mentions_offending_path() {
        let err = BridgeError::RelativeStoragePath(PathBuf::from("data/local"));
        assert!(err.to_string().contains("data/local"));
    }

    #[test]
    fn display_already_initialized() {
        let err = BridgeError::FileSystemAlreadyInitialized;
        assert_eq!(err.to_string(), "Native file system already initialized");
    }
}
