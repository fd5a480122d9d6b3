//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_shell_bridge::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Bridge facade
pub use crate::{Bridge, BridgeBuilder};

// Native core boundary
pub use crate::core::native_core::{ChannelCore, CoreEvent, CoreMessage, NativeCore};

// Lifecycle
pub use crate::core::lifecycle::{LifecycleEvent, LifecycleState};

// Input
pub use crate::core::input::{
    Key, KeyAction, KeyEvent, PointerAction, PointerBatch, PointerContact, TouchEvent, TouchPhase,
};

// Surfaces
pub use crate::core::surface::{PixelFormat, SlotId, SurfaceHandle, MAIN_SLOT};

// Shell, commands and queries
pub use crate::core::shell::{
    Command, CommandDispatcher, HostConfiguration, KeyboardClass, Orientation, QueryResponder,
    Shell, TextDialogState, WindowChromeMode,
};

// Files and errors
pub use crate::core::errors::BridgeError;
pub use crate::core::files::{AssetReader, DirectoryAssets, FileSystemContext};
