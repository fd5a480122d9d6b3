//=========================================================================
// Host Shell
//=========================================================================
//
// Everything the native core can ask of the host shell.
//
// Architecture:
//   ShellContext: the explicit "current shell" registration, shared
//   CommandDispatcher: native → UI command queue (any thread)
//   QueryResponder: lock-free scalar reads (any thread)
//   ShellSession: UI-side executor and remembered shell state
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod dispatcher;
mod interface;
mod queries;
mod session;

//=== Public API ==========================================================

pub use context::{ShellContext, ShellHandle};
pub use dispatcher::{Command, CommandDispatcher};
pub use interface::{
    HostConfiguration, KeyboardClass, Orientation, Shell, SystemUiFlags, TextDialogState,
    WindowChromeMode,
};
pub use queries::{IntegerQuery, NumberQuery, QueryResponder};

//=== Internal API ========================================================

pub(crate) use dispatcher::{QueuedCommand, Waker};
pub(crate) use session::ShellSession;
