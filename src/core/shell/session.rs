//=========================================================================
// Shell Session
//=========================================================================
//
// UI-side state of one bound shell: the shell itself plus everything
// the bridge remembers about it (window mode, orientation, text dialog).
//
// Only the UI-affinity context touches a session, so nothing here is
// synchronized.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::context::ShellHandle;
use super::dispatcher::Command;
use super::interface::{HostConfiguration, Orientation, Shell, TextDialogState, WindowChromeMode};

//=== ShellSession ========================================================

pub(crate) struct ShellSession {
    handle: ShellHandle,
    shell: Box<dyn Shell>,
    window_mode: WindowChromeMode,
    orientation: Option<Orientation>,
    dialog: TextDialogState,
    finished: bool,
}

impl ShellSession {
    pub(crate) fn new(handle: ShellHandle, shell: Box<dyn Shell>, window_mode: WindowChromeMode) -> Self {
        Self {
            handle,
            shell,
            window_mode,
            orientation: None,
            dialog: TextDialogState::default(),
            finished: false,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn handle(&self) -> ShellHandle {
        self.handle
    }

    pub(crate) fn window_mode(&self) -> WindowChromeMode {
        self.window_mode
    }

    pub(crate) fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub(crate) fn dialog(&self) -> &TextDialogState {
        &self.dialog
    }

    pub(crate) fn configuration(&self) -> HostConfiguration {
        self.shell.configuration()
    }

    //--- Command Execution ------------------------------------------------

    /// Performs one command against the shell.
    ///
    /// Returns `false` if the session already executed `FinishActivity`.
    pub(crate) fn execute(&mut self, command: Command) -> bool {
        if self.finished {
            trace!(target: "bridge::commands", "Shell finished, skipping {:?}", command);
            return false;
        }

        debug!(target: "bridge::commands", "Executing {:?}", command);

        match command {
            Command::FinishActivity => {
                self.finished = true;
                self.shell.finish();
            }
            Command::ShowKeyboard(show) => {
                if show {
                    self.shell.request_focus();
                }
                self.shell.show_soft_input(show);
            }
            Command::SetOrientation(orientation) => {
                self.orientation = Some(orientation);
                self.shell.set_orientation(orientation);
            }
            Command::InputTextDialog(text) => {
                self.dialog = TextDialogState::showing(text);
                self.shell.show_text_dialog(&self.dialog);
            }
            Command::SetWindowType(mode) => {
                self.window_mode = mode;
                self.shell.apply_chrome(mode, mode.system_ui_flags());
            }
        }
        true
    }

    //--- Dialog Dismissal -------------------------------------------------

    /// Closes the text dialog and reapplies the recorded window mode.
    ///
    /// `programmatic` asks the shell to hide the overlay; user-driven
    /// dismissals were already closed by the host. Returns `false` when
    /// no dialog was visible.
    pub(crate) fn close_dialog(&mut self, programmatic: bool) -> bool {
        if !self.dialog.visible {
            return false;
        }

        if programmatic {
            self.shell.hide_text_dialog();
        }
        self.dialog.visible = false;
        self.shell.apply_chrome(self.window_mode, self.window_mode.system_ui_flags());
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shell::context::ShellContext;
    use crate::test_support::{RecordingShell, ShellCall};

    fn session() -> (ShellSession, crate::test_support::CallLog) {
        let (shell, log) = RecordingShell::new();
        let handle = ShellContext::new().bind(HostConfiguration::default());
        (ShellSession::new(handle, Box::new(shell), WindowChromeMode::Normal), log)
    }

    #[test]
    fn show_keyboard_focuses_first() {
        let (mut session, log) = session();
        session.execute(Command::ShowKeyboard(true));

        assert_eq!(log.calls(), vec![ShellCall::RequestFocus, ShellCall::ShowSoftInput(true)]);
    }

    #[test]
    fn hide_keyboard_does_not_focus() {
        let (mut session, log) = session();
        session.execute(Command::ShowKeyboard(false));

        assert_eq!(log.calls(), vec![ShellCall::ShowSoftInput(false)]);
    }

    #[test]
    fn orientation_is_recorded_and_applied() {
        let (mut session, log) = session();
        session.execute(Command::SetOrientation(Orientation::Portrait));

        assert_eq!(session.orientation(), Some(Orientation::Portrait));
        assert_eq!(log.calls(), vec![ShellCall::SetOrientation(Orientation::Portrait)]);
    }

    #[test]
    fn window_type_is_recorded_and_applied() {
        let (mut session, log) = session();
        session.execute(Command::SetWindowType(WindowChromeMode::Fullscreen));

        assert_eq!(session.window_mode(), WindowChromeMode::Fullscreen);
        assert_eq!(log.calls(), vec![ShellCall::ApplyChrome(WindowChromeMode::Fullscreen)]);
    }

    #[test]
    fn text_dialog_shows_with_cursor_at_end() {
        let (mut session, log) = session();
        session.execute(Command::InputTextDialog("player".to_string()));

        assert!(session.dialog().visible);
        assert_eq!(session.dialog().cursor_position, 6);
        assert_eq!(
            log.calls(),
            vec![ShellCall::ShowTextDialog("player".to_string(), 6)]
        );
    }

    #[test]
    fn nothing_runs_after_finish() {
        let (mut session, log) = session();
        assert!(session.execute(Command::FinishActivity));
        assert!(!session.execute(Command::ShowKeyboard(true)));

        assert_eq!(log.calls(), vec![ShellCall::Finish]);
    }

    #[test]
    fn close_dialog_reapplies_recorded_mode() {
        let (mut session, log) = session();
        session.execute(Command::SetWindowType(WindowChromeMode::Fullscreen));
        session.execute(Command::InputTextDialog(String::new()));
        log.clear();

        assert!(session.close_dialog(false));
        assert!(!session.dialog().visible);
        assert_eq!(log.calls(), vec![ShellCall::ApplyChrome(WindowChromeMode::Fullscreen)]);
    }

    #[test]
    fn programmatic_close_hides_overlay() {
        let (mut session, log) = session();
        session.execute(Command::InputTextDialog(String::new()));
        log.clear();

        session.close_dialog(true);
        assert_eq!(
            log.calls(),
            vec![ShellCall::HideTextDialog, ShellCall::ApplyChrome(WindowChromeMode::Normal)]
        );
    }

    #[test]
    fn close_without_dialog_is_noop() {
        let (mut session, log) = session();
        assert!(!session.close_dialog(true));
        assert!(log.calls().is_empty());
    }
}
