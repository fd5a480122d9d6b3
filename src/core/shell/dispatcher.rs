//=========================================================================
// Command Dispatcher
//=========================================================================
//
// Native-core → host command path.
//
// Architecture:
//   Native thread ─► CommandDispatcher::dispatch()
//                       │  (no shell? drop)
//                       ▼
//                    Sender<QueuedCommand> ──► UI thread: Bridge::pump_commands()
//                       │                                  └─► ShellSession::execute()
//                       └─► waker()  (host wakes its UI loop)
//
// Every command is queued, even when issued from the UI thread, so all
// shell mutations happen in one place and in issue order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::sync::Arc;

use crossbeam_channel::Sender;
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::context::{ShellContext, ShellHandle};
use super::interface::{Orientation, WindowChromeMode};

//=== Command =============================================================

/// A request from the native core to the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Tear down the shell.
    FinishActivity,

    /// Show (`true`) or hide the soft keyboard.
    ShowKeyboard(bool),

    SetOrientation(Orientation),

    /// Open the text entry overlay pre-filled with this text.
    InputTextDialog(String),

    /// Record and apply a window chrome mode.
    SetWindowType(WindowChromeMode),
}

impl Command {
    /// Decodes a raw boundary message; unknown kinds yield `None`.
    pub fn decode(kind: i32, x: i32, _y: i32, text: Option<String>) -> Option<Self> {
        match kind {
            1 => Some(Self::FinishActivity),
            2 => Some(Self::ShowKeyboard(x == 1)),
            3 => Some(Self::SetOrientation(Orientation::from_raw(x))),
            4 => Some(Self::InputTextDialog(text.unwrap_or_default())),
            5 => Some(Self::SetWindowType(WindowChromeMode::from_raw(x))),
            _ => None,
        }
    }
}

//=== QueuedCommand =======================================================

/// A command stamped with the shell it was issued against.
#[derive(Debug)]
pub(crate) struct QueuedCommand {
    pub(crate) handle: ShellHandle,
    pub(crate) command: Command,
}

//=== Waker ===============================================================

/// Host hook that wakes the UI loop after a command is queued.
pub(crate) type Waker = Arc<dyn Fn() + Send + Sync>;

//=== CommandDispatcher ===================================================

/// Thread-safe entry point for native-core commands.
///
/// Cheap to clone. Commands issued while no shell is live are dropped.
#[derive(Clone)]
pub struct CommandDispatcher {
    context: ShellContext,
    sender: Sender<QueuedCommand>,
    waker: Option<Waker>,
}

impl CommandDispatcher {
    pub(crate) fn new(context: ShellContext, sender: Sender<QueuedCommand>, waker: Option<Waker>) -> Self {
        Self {
            context,
            sender,
            waker,
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Queues `command` for execution on the UI-affinity context.
    pub fn dispatch(&self, command: Command) {
        let Some(handle) = self.context.current() else {
            trace!(target: "bridge::commands", "No live shell, dropping {:?}", command);
            return;
        };

        if command == Command::FinishActivity {
            self.context.begin_finish(handle);
        }

        if let Err(err) = self.sender.send(QueuedCommand { handle, command }) {
            warn!(
                target: "bridge::commands",
                "Bridge gone, dropping {:?}",
                err.into_inner().command
            );
            return;
        }

        if let Some(wake) = &self.waker {
            wake();
        }
    }

    /// Decodes and dispatches a raw boundary message.
    pub fn dispatch_raw(&self, kind: i32, x: i32, y: i32, text: Option<String>) {
        match Command::decode(kind, x, y, text) {
            Some(command) => self.dispatch(command),
            None => warn!(target: "bridge::commands", "Unknown command kind {}", kind),
        }
    }

    //--- Convenience ------------------------------------------------------

    pub fn finish_activity(&self) {
        self.dispatch(Command::FinishActivity);
    }

    pub fn show_keyboard(&self, show: bool) {
        self.dispatch(Command::ShowKeyboard(show));
    }

    pub fn set_orientation(&self, orientation: Orientation) {
        self.dispatch(Command::SetOrientation(orientation));
    }

    pub fn input_text_dialog(&self, text: impl Into<String>) {
        self.dispatch(Command::InputTextDialog(text.into()));
    }

    pub fn set_window_type(&self, mode: WindowChromeMode) {
        self.dispatch(Command::SetWindowType(mode));
    }
}

impl fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("context", &self.context)
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
