//=========================================================================
// Key Mapping
//
// Portable key identities and their host key codes.
//
// The bridge forwards host key codes verbatim; this table lets the
// native core (and non-mobile hosts) speak the same code space without
// hardcoding numbers.
//
//=========================================================================

//=== Key =================================================================

/// Physical key identity, independent of host code numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    //--- Editing Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Insert,
    Comma,
    Period,

    //--- Modifiers --------------------------------------------------------

    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,

    //--- Navigation -------------------------------------------------------

    Home,
    End,
    PageUp,
    PageDown,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- System Keys ------------------------------------------------------

    /// Host "back" navigation key.
    Back,

    /// Host context-menu key.
    Menu,

    /// Fallback for codes with no entry in the table.
    Unidentified,
}

//=== Host Code Table =====================================================
//
// First match wins for reverse lookup, so the canonical code of a key
// comes before any alias (Enter before the d-pad center).
//
const HOST_KEY_TABLE: &[(i32, Key)] = &[
    (4, Key::Back),
    (7, Key::Digit0), (8, Key::Digit1), (9, Key::Digit2), (10, Key::Digit3),
    (11, Key::Digit4), (12, Key::Digit5), (13, Key::Digit6), (14, Key::Digit7),
    (15, Key::Digit8), (16, Key::Digit9),
    (19, Key::ArrowUp), (20, Key::ArrowDown), (21, Key::ArrowLeft), (22, Key::ArrowRight),
    (29, Key::KeyA), (30, Key::KeyB), (31, Key::KeyC), (32, Key::KeyD), (33, Key::KeyE),
    (34, Key::KeyF), (35, Key::KeyG), (36, Key::KeyH), (37, Key::KeyI), (38, Key::KeyJ),
    (39, Key::KeyK), (40, Key::KeyL), (41, Key::KeyM), (42, Key::KeyN), (43, Key::KeyO),
    (44, Key::KeyP), (45, Key::KeyQ), (46, Key::KeyR), (47, Key::KeyS), (48, Key::KeyT),
    (49, Key::KeyU), (50, Key::KeyV), (51, Key::KeyW), (52, Key::KeyX), (53, Key::KeyY),
    (54, Key::KeyZ),
    (55, Key::Comma), (56, Key::Period),
    (57, Key::AltLeft), (58, Key::AltRight),
    (59, Key::ShiftLeft), (60, Key::ShiftRight),
    (61, Key::Tab), (62, Key::Space),
    (66, Key::Enter),
    (23, Key::Enter),
    (67, Key::Backspace),
    (82, Key::Menu),
    (92, Key::PageUp), (93, Key::PageDown),
    (111, Key::Escape),
    (112, Key::Delete),
    (113, Key::ControlLeft), (114, Key::ControlRight),
    (122, Key::Home), (123, Key::End), (124, Key::Insert),
    (131, Key::F1), (132, Key::F2), (133, Key::F3), (134, Key::F4),
    (135, Key::F5), (136, Key::F6), (137, Key::F7), (138, Key::F8),
    (139, Key::F9), (140, Key::F10), (141, Key::F11), (142, Key::F12),
];

/// Host code reported for keys the host cannot identify.
pub const UNKNOWN_HOST_CODE: i32 = 0;

impl Key {
    /// Looks up the key for a host key code.
    pub fn from_host_code(code: i32) -> Self {
        HOST_KEY_TABLE
            .iter()
            .find(|(host, _)| *host == code)
            .map(|(_, key)| *key)
            .unwrap_or(Key::Unidentified)
    }

    /// Canonical host key code, `UNKNOWN_HOST_CODE` for `Unidentified`.
    pub fn host_code(self) -> i32 {
        HOST_KEY_TABLE
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(host, _)| *host)
            .unwrap_or(UNKNOWN_HOST_CODE)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map() {
        assert_eq!(Key::from_host_code(7), Key::Digit0);
        assert_eq!(Key::from_host_code(16), Key::Digit9);
        assert_eq!(Key::from_host_code(29), Key::KeyA);
        assert_eq!(Key::from_host_code(54), Key::KeyZ);
    }

    #[test]
    fn dpad_center_is_enter_alias() {
        assert_eq!(Key::from_host_code(23), Key::Enter);
        assert_eq!(Key::Enter.host_code(), 66, "Canonical Enter code wins");
    }

    #[test]
    fn editing_keys_map() {
        assert_eq!(Key::from_host_code(67), Key::Backspace);
        assert_eq!(Key::from_host_code(112), Key::Delete);
        assert_eq!(Key::from_host_code(111), Key::Escape);
    }

    #[test]
    fn unmapped_codes_are_unidentified() {
        assert_eq!(Key::from_host_code(0), Key::Unidentified);
        assert_eq!(Key::from_host_code(24), Key::Unidentified, "Volume up is unmapped");
        assert_eq!(Key::from_host_code(-1), Key::Unidentified);
    }

    #[test]
    fn unidentified_has_unknown_host_code() {
        assert_eq!(Key::Unidentified.host_code(), UNKNOWN_HOST_CODE);
    }

    #[test]
    fn every_table_key_resolves_back_to_itself() {
        for (_, key) in HOST_KEY_TABLE {
            assert_eq!(Key::from_host_code(key.host_code()), *key, "{:?}", key);
        }
    }
}
