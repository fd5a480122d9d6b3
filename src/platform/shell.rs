//=========================================================================
// Winit Shell
//=========================================================================
//
// `Shell` implementation backed by a Winit window.
//
// Desktop stand-ins:
//   finish          → exit request picked up after the command pump
//   soft input      → IME allowed / disallowed (kept on under the entry)
//   text dialog     → `TextEntry` echoed in the window title
//   chrome          → borderless fullscreen vs windowed
//   orientation     → unsupported, logged
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, trace};
use winit::window::{Fullscreen, Window};

//=== Internal Dependencies ===============================================

use super::text_entry::TextEntry;
use crate::core::shell::{
    HostConfiguration, KeyboardClass, Orientation, Shell, SystemUiFlags, TextDialogState,
    WindowChromeMode,
};

//=== Constants ===========================================================

pub(crate) const WINDOW_TITLE: &str = "Aetheric Shell";

//=== Overlay Rendering ===================================================

/// Mirrors the entry state onto the window: title echo and IME.
pub(crate) fn render_entry(window: &Window, entry: &TextEntry) {
    if entry.is_open() {
        window.set_title(&entry_title(entry.text(), entry.cursor()));
    } else {
        window.set_title(WINDOW_TITLE);
    }
    window.set_ime_allowed(entry.wants_ime());
}

/// Title echo with `|` marking the cursor (a character index).
fn entry_title(text: &str, cursor: usize) -> String {
    let split = text
        .char_indices()
        .nth(cursor)
        .map(|(at, _)| at)
        .unwrap_or(text.len());
    let (before, after) = text.split_at(split);
    format!("{WINDOW_TITLE}: {before}|{after}")
}

//=== WinitShell ==========================================================

pub(crate) struct WinitShell {
    window: Rc<Window>,
    entry: Rc<RefCell<TextEntry>>,
    exit_requested: Rc<Cell<bool>>,
}

impl WinitShell {
    pub(crate) fn new(
        window: Rc<Window>,
        entry: Rc<RefCell<TextEntry>>,
        exit_requested: Rc<Cell<bool>>,
    ) -> Self {
        Self {
            window,
            entry,
            exit_requested,
        }
    }
}

impl Shell for WinitShell {
    fn finish(&mut self) {
        info!(target: "platform", "Finish requested, exiting event loop");
        self.exit_requested.set(true);
    }

    fn request_focus(&mut self) {
        self.window.focus_window();
    }

    fn show_soft_input(&mut self, show: bool) {
        let mut entry = self.entry.borrow_mut();
        entry.set_soft_input(show);
        self.window.set_ime_allowed(entry.wants_ime());
    }

    fn set_orientation(&mut self, orientation: Orientation) {
        debug!(target: "platform", "Orientation {:?} unsupported on desktop", orientation);
    }

    fn show_text_dialog(&mut self, dialog: &TextDialogState) {
        let mut entry = self.entry.borrow_mut();
        entry.open(&dialog.initial_text, dialog.cursor_position);
        render_entry(&self.window, &entry);
    }

    fn hide_text_dialog(&mut self) {
        let mut entry = self.entry.borrow_mut();
        entry.close();
        render_entry(&self.window, &entry);
    }

    fn apply_chrome(&mut self, mode: WindowChromeMode, flags: SystemUiFlags) {
        trace!(target: "platform", "Chrome {:?} (flags {:#x})", mode, flags.bits());

        match mode {
            WindowChromeMode::Fullscreen => {
                self.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
            }
            WindowChromeMode::Normal => self.window.set_fullscreen(None),
            WindowChromeMode::Desktop => {
                self.window.set_fullscreen(None);
                self.window.set_resizable(false);
            }
            WindowChromeMode::Resizable => {
                self.window.set_fullscreen(None);
                self.window.set_resizable(true);
            }
        }
    }

    fn configuration(&self) -> HostConfiguration {
        HostConfiguration {
            density: self.window.scale_factor() as f32,
            keyboard: KeyboardClass::Qwerty,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_title_marks_cursor() {
        assert_eq!(entry_title("bob", 3), "Aetheric Shell: bob|");
        assert_eq!(entry_title("bob", 1), "Aetheric Shell: b|ob");
        assert_eq!(entry_title("ñb", 1), "Aetheric Shell: ñ|b");
    }
}
