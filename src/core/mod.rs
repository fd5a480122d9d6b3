//=========================================================================
// Bridge Core
//
// Host-independent building blocks of the bridge.
//
// Responsibilities:
// - Describe the host → native-core event stream (`native_core`)
// - Track the shell lifecycle and check its grammar (`lifecycle`)
// - Normalize pointer and key input (`input`)
// - Bind surfaces to render slots (`surface`)
// - Carry native-core commands and queries back to the shell (`shell`)
// - Hand file-system roots to the native core (`files`)
//
// Notes:
// Nothing in here knows about a concrete windowing toolkit. The winit
// host lives in `crate::platform`; any other host (a JNI shim, a test
// harness) drives `crate::Bridge` the same way.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod errors;
pub mod files;
pub mod input;
pub mod lifecycle;
pub mod native_core;
pub mod shell;
pub mod surface;
