//=========================================================================
// Test Support
//=========================================================================
//
// Recording shell and channel-backed core shared by unit tests.
//
//=========================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crossbeam_channel::Receiver;

use crate::core::native_core::{ChannelCore, CoreEvent, CoreMessage};
use crate::core::shell::{
    HostConfiguration, KeyboardClass, Orientation, Shell, SystemUiFlags, TextDialogState,
    WindowChromeMode,
};

//=== ShellCall ===========================================================

/// One recorded `Shell` method invocation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShellCall {
    Finish,
    RequestFocus,
    ShowSoftInput(bool),
    SetOrientation(Orientation),
    ShowTextDialog(String, usize),
    HideTextDialog,
    ApplyChrome(WindowChromeMode),
}

//=== CallLog =============================================================

#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<ShellCall>>>);

impl CallLog {
    pub(crate) fn calls(&self) -> Vec<ShellCall> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, call: ShellCall) {
        self.0.borrow_mut().push(call);
    }
}

//=== RecordingShell ======================================================

pub(crate) struct RecordingShell {
    log: CallLog,
    config: HostConfiguration,
}

impl RecordingShell {
    pub(crate) fn new() -> (Self, CallLog) {
        Self::with_config(HostConfiguration {
            density: 2.0,
            keyboard: KeyboardClass::NoKeys,
        })
    }

    pub(crate) fn with_config(config: HostConfiguration) -> (Self, CallLog) {
        let log = CallLog::default();
        (
            Self {
                log: log.clone(),
                config,
            },
            log,
        )
    }
}

impl Shell for RecordingShell {
    fn finish(&mut self) {
        self.log.push(ShellCall::Finish);
    }

    fn request_focus(&mut self) {
        self.log.push(ShellCall::RequestFocus);
    }

    fn show_soft_input(&mut self, show: bool) {
        self.log.push(ShellCall::ShowSoftInput(show));
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        self.log.push(ShellCall::SetOrientation(orientation));
    }

    fn show_text_dialog(&mut self, dialog: &TextDialogState) {
        self.log.push(ShellCall::ShowTextDialog(
            dialog.initial_text.clone(),
            dialog.cursor_position,
        ));
    }

    fn hide_text_dialog(&mut self) {
        self.log.push(ShellCall::HideTextDialog);
    }

    fn apply_chrome(&mut self, mode: WindowChromeMode, flags: SystemUiFlags) {
        assert_eq!(flags, mode.system_ui_flags(), "Chrome flags must match mode");
        self.log.push(ShellCall::ApplyChrome(mode));
    }

    fn configuration(&self) -> HostConfiguration {
        self.config
    }
}

//=== Core Stream =========================================================

/// Channel-backed core plus the receiving end.
pub(crate) fn channel_core() -> (ChannelCore, Receiver<CoreMessage>) {
    ChannelCore::new()
}

/// Drains every `CoreEvent` currently in the channel, skipping other
/// message kinds.
pub(crate) fn drain_events(rx: &Receiver<CoreMessage>) -> Vec<CoreEvent> {
    rx.try_iter()
        .filter_map(|message| match message {
            CoreMessage::Event(event) => Some(event),
            _ => None,
        })
        .collect()
}
