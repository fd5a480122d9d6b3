//=========================================================================
// Text Entry
//=========================================================================
//
// Single-line edit buffer standing in for the text dialog on desktop.
//
// The cursor is a character index, never a byte index, so multi-byte
// input edits cleanly.
//
// The entry also owns the IME decision: input stays enabled while the
// entry is open or while the native core asked for the keyboard.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::Key;

//=== EntryOutcome ========================================================

/// What an edit key did to the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntryOutcome {
    Editing,
    Confirmed(String),
    Cancelled,
}

//=== TextEntry ===========================================================

#[derive(Debug, Default)]
pub(crate) struct TextEntry {
    text: String,
    cursor: usize,
    open: bool,

    /// Last `ShowKeyboard` request from the native core.
    soft_input: bool,

    /// Keys whose press the entry consumed; their releases are consumed too.
    claimed: Vec<Key>,
}

impl TextEntry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the window should accept IME input.
    pub(crate) fn wants_ime(&self) -> bool {
        self.open || self.soft_input
    }

    pub(crate) fn set_soft_input(&mut self, show: bool) {
        self.soft_input = show;
    }

    //--- Open / Close -----------------------------------------------------

    /// Opens (or refreshes) the entry with `text`, cursor clamped to its end.
    pub(crate) fn open(&mut self, text: &str, cursor: usize) {
        self.text = text.to_string();
        self.cursor = cursor.min(self.char_count());
        self.open = true;
    }

    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    //--- Key Routing ------------------------------------------------------

    /// Whether a key event belongs to the entry rather than the native core.
    ///
    /// Presses belong to the entry while it is open. A release belongs to
    /// it when the matching press did, even if the entry closed since.
    pub(crate) fn claims_key(&mut self, key: Key, pressed: bool) -> bool {
        if pressed {
            if self.open && !self.claimed.contains(&key) {
                self.claimed.push(key);
            }
            return self.open;
        }

        match self.claimed.iter().position(|claimed| *claimed == key) {
            Some(at) => {
                self.claimed.swap_remove(at);
                true
            }
            None => false,
        }
    }

    //--- Editing ----------------------------------------------------------

    /// Applies an edit key. Returns `None` for keys that do not edit, so
    /// the caller can fall back to inserting the key's text.
    pub(crate) fn handle_key(&mut self, key: Key) -> Option<EntryOutcome> {
        if !self.open {
            return None;
        }

        match key {
            Key::Enter => {
                self.open = false;
                return Some(EntryOutcome::Confirmed(std::mem::take(&mut self.text)));
            }
            Key::Escape | Key::Back => {
                self.open = false;
                return Some(EntryOutcome::Cancelled);
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at_cursor();
                }
            }
            Key::Delete => self.remove_at_cursor(),
            Key::ArrowLeft => self.cursor = self.cursor.saturating_sub(1),
            Key::ArrowRight => self.cursor = (self.cursor + 1).min(self.char_count()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.char_count(),
            _ => return None,
        }
        Some(EntryOutcome::Editing)
    }

    /// Inserts typed or committed text at the cursor, skipping control
    /// characters.
    pub(crate) fn insert(&mut self, input: &str) {
        if !self.open {
            return;
        }

        for ch in input.chars().filter(|c| !c.is_control()) {
            let at = self.byte_offset(self.cursor);
            self.text.insert(at, ch);
            self.cursor += 1;
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(at, _)| at)
            .unwrap_or(self.text.len())
    }

    fn remove_at_cursor(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.text.remove(at);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn open(text: &str) -> TextEntry {
        let mut entry = TextEntry::new();
        entry.open(text, text.chars().count());
        entry
    }

    #[test]
    fn starts_closed() {
        let entry = TextEntry::new();
        assert!(!entry.is_open());
        assert_eq!(entry.text(), "");
    }

    #[test]
    fn open_clamps_cursor() {
        let mut entry = TextEntry::new();
        entry.open("ab", 10);
        assert_eq!(entry.cursor(), 2);
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut entry = open("ac");
        entry.handle_key(Key::ArrowLeft);
        entry.insert("b");

        assert_eq!(entry.text(), "abc");
        assert_eq!(entry.cursor(), 2);
    }

    #[test]
    fn control_characters_are_skipped() {
        let mut entry = open("");
        entry.insert("a\r\u{8}b");
        assert_eq!(entry.text(), "ab");
    }

    #[test]
    fn backspace_and_delete_handle_multibyte() {
        let mut entry = open("ñañ");
        entry.handle_key(Key::Backspace);
        assert_eq!(entry.text(), "ña");

        entry.handle_key(Key::Home);
        entry.handle_key(Key::Delete);
        assert_eq!(entry.text(), "a");
        assert_eq!(entry.cursor(), 0);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut entry = open("x");
        entry.handle_key(Key::Home);
        assert_eq!(entry.handle_key(Key::Backspace), Some(EntryOutcome::Editing));
        assert_eq!(entry.text(), "x");
    }

    #[test]
    fn enter_confirms_and_closes() {
        let mut entry = open("name");
        assert_eq!(
            entry.handle_key(Key::Enter),
            Some(EntryOutcome::Confirmed("name".to_string()))
        );
        assert!(!entry.is_open());
    }

    #[test]
    fn escape_cancels_and_closes() {
        let mut entry = open("name");
        assert_eq!(entry.handle_key(Key::Escape), Some(EntryOutcome::Cancelled));
        assert!(!entry.is_open());
    }

    #[test]
    fn non_edit_keys_fall_through() {
        let mut entry = open("");
        assert_eq!(entry.handle_key(Key::KeyA), None);
    }

    #[test]
    fn release_of_closing_key_is_claimed() {
        let mut entry = open("name");

        assert!(entry.claims_key(Key::Enter, true));
        entry.handle_key(Key::Enter);
        assert!(!entry.is_open());

        assert!(entry.claims_key(Key::Enter, false));
        assert!(!entry.claims_key(Key::Enter, false), "Claimed once per press");
    }

    #[test]
    fn keys_pressed_before_opening_release_to_core() {
        let mut entry = TextEntry::new();
        assert!(!entry.claims_key(Key::KeyW, true));

        entry.open("", 0);
        assert!(!entry.claims_key(Key::KeyW, false));
    }

    #[test]
    fn repeated_presses_claim_one_release() {
        let mut entry = open("");
        entry.claims_key(Key::Backspace, true);
        entry.claims_key(Key::Backspace, true);

        assert!(entry.claims_key(Key::Backspace, false));
        assert!(!entry.claims_key(Key::Backspace, false));
    }

    #[test]
    fn ime_follows_open_entry_or_keyboard_request() {
        let mut entry = TextEntry::new();
        assert!(!entry.wants_ime());

        entry.set_soft_input(true);
        entry.open("", 0);
        entry.close();
        assert!(entry.wants_ime(), "Closing keeps the requested keyboard");

        entry.set_soft_input(false);
        assert!(!entry.wants_ime());

        entry.open("", 0);
        assert!(entry.wants_ime());
    }

    #[test]
    fn closed_entry_ignores_input() {
        let mut entry = TextEntry::new();
        entry.insert("abc");
        assert_eq!(entry.handle_key(Key::Enter), None);
        assert_eq!(entry.text(), "");
    }
}
