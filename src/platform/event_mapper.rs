//=========================================================================
// Platform Event Mapper
//
// Converts Winit input into the bridge's host-level input types.
//
// Responsibilities:
// - Translate physical key codes to portable `Key`s
// - Turn touch and left-button mouse input into pointer batches
// - Give touches contact ids that never clash with the mouse
// - Provide fallbacks (`Unidentified`) for unmapped inputs
//
// Desktop hosts have no portable scan code, so key events carry the
// host code from the key table and a zero scan code.
//
//=========================================================================

use winit::event::{ElementState, TouchPhase as WinitTouchPhase};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::core::input::{ContactId, Key, KeyAction, PointerAction, PointerBatch, PointerContact};

//=== Key Conversion ======================================================

/// Contact id used for the left mouse button.
pub(crate) const MOUSE_CONTACT: ContactId = 0;

/// Scan code reported for desktop key events.
pub(crate) const DESKTOP_SCAN_CODE: i32 = 0;

impl From<WinitKeyCode> for Key {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Numeric keys -----------------------------------------------------
            Digit0 => Key::Digit0, Digit1 => Key::Digit1,
            Digit2 => Key::Digit2, Digit3 => Key::Digit3,
            Digit4 => Key::Digit4, Digit5 => Key::Digit5,
            Digit6 => Key::Digit6, Digit7 => Key::Digit7,
            Digit8 => Key::Digit8, Digit9 => Key::Digit9,

            //--- Alphabetic keys --------------------------------------------------
            KeyA => Key::KeyA, KeyB => Key::KeyB, KeyC => Key::KeyC,
            KeyD => Key::KeyD, KeyE => Key::KeyE, KeyF => Key::KeyF,
            KeyG => Key::KeyG, KeyH => Key::KeyH, KeyI => Key::KeyI,
            KeyJ => Key::KeyJ, KeyK => Key::KeyK, KeyL => Key::KeyL,
            KeyM => Key::KeyM, KeyN => Key::KeyN, KeyO => Key::KeyO,
            KeyP => Key::KeyP, KeyQ => Key::KeyQ, KeyR => Key::KeyR,
            KeyS => Key::KeyS, KeyT => Key::KeyT, KeyU => Key::KeyU,
            KeyV => Key::KeyV, KeyW => Key::KeyW, KeyX => Key::KeyX,
            KeyY => Key::KeyY, KeyZ => Key::KeyZ,

            //--- Arrow keys -------------------------------------------------------
            ArrowDown => Key::ArrowDown, ArrowLeft => Key::ArrowLeft,
            ArrowRight => Key::ArrowRight, ArrowUp => Key::ArrowUp,

            //--- Editing keys -----------------------------------------------------
            Space => Key::Space,
            Enter | NumpadEnter => Key::Enter,
            Escape => Key::Escape,
            Tab => Key::Tab,
            Backspace => Key::Backspace,
            Delete => Key::Delete,
            Insert => Key::Insert,
            Comma => Key::Comma,
            Period => Key::Period,

            //--- Modifiers --------------------------------------------------------
            ShiftLeft => Key::ShiftLeft, ShiftRight => Key::ShiftRight,
            ControlLeft => Key::ControlLeft, ControlRight => Key::ControlRight,
            AltLeft => Key::AltLeft, AltRight => Key::AltRight,

            //--- Navigation -------------------------------------------------------
            Home => Key::Home, End => Key::End,
            PageUp => Key::PageUp, PageDown => Key::PageDown,

            //--- Function keys ----------------------------------------------------
            F1 => Key::F1, F2 => Key::F2, F3 => Key::F3, F4 => Key::F4,
            F5 => Key::F5, F6 => Key::F6, F7 => Key::F7, F8 => Key::F8,
            F9 => Key::F9, F10 => Key::F10, F11 => Key::F11, F12 => Key::F12,

            //--- System keys ------------------------------------------------------
            BrowserBack => Key::Back,
            ContextMenu => Key::Menu,

            //--- Fallback ---------------------------------------------------------
            _ => Key::Unidentified,
        }
    }
}

/// Portable key for a Winit physical key.
pub(crate) fn physical_to_key(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(code) => Key::from(code),
        PhysicalKey::Unidentified(_) => Key::Unidentified,
    }
}

pub(crate) fn key_action(state: ElementState) -> KeyAction {
    match state {
        ElementState::Pressed => KeyAction::Down,
        ElementState::Released => KeyAction::Up,
    }
}

//=== Pointer Conversion ==================================================

pub(crate) fn touch_action(phase: WinitTouchPhase) -> PointerAction {
    match phase {
        WinitTouchPhase::Started => PointerAction::Down,
        WinitTouchPhase::Moved => PointerAction::Move,
        WinitTouchPhase::Ended => PointerAction::Up,
        WinitTouchPhase::Cancelled => PointerAction::Cancel,
    }
}

/// First contact id handed to touches; lower ids belong to the mouse.
pub(crate) const FIRST_TOUCH_CONTACT: ContactId = MOUSE_CONTACT + 1;

//=== TouchContacts =======================================================

/// Assigns bridge contact ids to Winit touch ids.
///
/// Winit touch ids are opaque `u64`s. Each active touch gets the lowest
/// free id from `FIRST_TOUCH_CONTACT` up, held until the touch ends or
/// is cancelled, so ids never collide with each other or the mouse.
#[derive(Debug, Default)]
pub(crate) struct TouchContacts {
    active: Vec<(u64, ContactId)>,
}

impl TouchContacts {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Single-contact batch for one Winit touch update.
    ///
    /// Winit reports each finger separately, so every batch holds exactly
    /// the contact that changed.
    pub(crate) fn batch(
        &mut self,
        phase: WinitTouchPhase,
        id: u64,
        x: f64,
        y: f64,
    ) -> PointerBatch {
        let contact = self.contact_for(id);
        if matches!(phase, WinitTouchPhase::Ended | WinitTouchPhase::Cancelled) {
            self.active.retain(|(touch, _)| *touch != id);
        }

        PointerBatch::single(
            touch_action(phase),
            PointerContact::new(contact, x as f32, y as f32),
        )
    }

    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Forgets every touch, e.g. when the surface goes away mid-gesture.
    pub(crate) fn clear(&mut self) {
        self.active.clear();
    }

    fn contact_for(&mut self, id: u64) -> ContactId {
        if let Some((_, contact)) = self.active.iter().find(|(touch, _)| *touch == id) {
            return *contact;
        }

        let mut contact = FIRST_TOUCH_CONTACT;
        while self.active.iter().any(|(_, used)| *used == contact) {
            contact += 1;
        }
        self.active.push((id, contact));
        contact
    }
}

//=== Mouse Conversion ====================================================

/// Left-button press or release as contact `MOUSE_CONTACT`.
pub(crate) fn mouse_button_batch(state: ElementState, x: f32, y: f32) -> PointerBatch {
    let action = match state {
        ElementState::Pressed => PointerAction::Down,
        ElementState::Released => PointerAction::Up,
    };
    PointerBatch::single(action, PointerContact::new(MOUSE_CONTACT, x, y))
}

/// Cursor drag with the left button held.
pub(crate) fn mouse_drag_batch(x: f32, y: f32) -> PointerBatch {
    PointerBatch::single(PointerAction::Move, PointerContact::new(MOUSE_CONTACT, x, y))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn letters_map_to_host_codes() {
        assert_eq!(Key::from(WinitKeyCode::KeyA).host_code(), 29);
        assert_eq!(Key::from(WinitKeyCode::KeyZ).host_code(), 54);
    }

    #[test]
    fn both_enters_are_enter() {
        assert_eq!(Key::from(WinitKeyCode::Enter), Key::Enter);
        assert_eq!(Key::from(WinitKeyCode::NumpadEnter), Key::Enter);
        assert_eq!(Key::Enter.host_code(), 66);
    }

    #[test]
    fn unmapped_key_is_unidentified() {
        assert_eq!(Key::from(WinitKeyCode::F24), Key::Unidentified);
        assert_eq!(
            physical_to_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            Key::Unidentified
        );
    }

    #[test]
    fn key_states_map_to_actions() {
        assert_eq!(key_action(ElementState::Pressed), KeyAction::Down);
        assert_eq!(key_action(ElementState::Released), KeyAction::Up);
    }

    #[test]
    fn touch_phases_map_to_pointer_actions() {
        assert_eq!(touch_action(WinitTouchPhase::Started), PointerAction::Down);
        assert_eq!(touch_action(WinitTouchPhase::Moved), PointerAction::Move);
        assert_eq!(touch_action(WinitTouchPhase::Ended), PointerAction::Up);
        assert_eq!(touch_action(WinitTouchPhase::Cancelled), PointerAction::Cancel);
    }

    #[test]
    fn touch_batch_holds_one_contact() {
        let mut touches = TouchContacts::new();
        let batch = touches.batch(WinitTouchPhase::Started, 4, 10.5, 20.25);

        assert_eq!(batch.action, PointerAction::Down);
        assert_eq!(batch.contacts, vec![PointerContact::new(FIRST_TOUCH_CONTACT, 10.5, 20.25)]);
        assert_eq!(
            batch.action_contact(),
            Some(&PointerContact::new(FIRST_TOUCH_CONTACT, 10.5, 20.25))
        );
    }

    #[test]
    fn touch_ids_are_stable_until_release() {
        let mut touches = TouchContacts::new();
        let down = touches.batch(WinitTouchPhase::Started, 900, 0.0, 0.0);
        let moved = touches.batch(WinitTouchPhase::Moved, 900, 1.0, 1.0);
        let up = touches.batch(WinitTouchPhase::Ended, 900, 1.0, 1.0);

        let ids: Vec<_> = [down, moved, up].iter().map(|b| b.contacts[0].id).collect();
        assert_eq!(ids, vec![FIRST_TOUCH_CONTACT; 3]);
        assert_eq!(touches.active_count(), 0);
    }

    #[test]
    fn wide_touch_ids_do_not_collide() {
        let mut touches = TouchContacts::new();
        let low = touches.batch(WinitTouchPhase::Started, 7, 0.0, 0.0);
        let high = touches.batch(WinitTouchPhase::Started, 7 + (1u64 << 32), 0.0, 0.0);

        assert_ne!(low.contacts[0].id, high.contacts[0].id);
    }

    #[test]
    fn touch_zero_does_not_take_mouse_contact() {
        let mut touches = TouchContacts::new();
        let batch = touches.batch(WinitTouchPhase::Started, 0, 0.0, 0.0);

        assert_ne!(batch.contacts[0].id, MOUSE_CONTACT);
    }

    #[test]
    fn released_ids_are_reused() {
        let mut touches = TouchContacts::new();
        touches.batch(WinitTouchPhase::Started, 1, 0.0, 0.0);
        let second = touches.batch(WinitTouchPhase::Started, 2, 0.0, 0.0);
        touches.batch(WinitTouchPhase::Cancelled, 1, 0.0, 0.0);
        let third = touches.batch(WinitTouchPhase::Started, 3, 0.0, 0.0);

        assert_eq!(second.contacts[0].id, FIRST_TOUCH_CONTACT + 1);
        assert_eq!(third.contacts[0].id, FIRST_TOUCH_CONTACT);
    }

    #[test]
    fn mouse_uses_contact_zero() {
        let down = mouse_button_batch(ElementState::Pressed, 1.0, 2.0);
        let drag = mouse_drag_batch(3.0, 4.0);
        let up = mouse_button_batch(ElementState::Released, 3.0, 4.0);

        assert_eq!(down.action, PointerAction::Down);
        assert_eq!(drag.action, PointerAction::Move);
        assert_eq!(up.action, PointerAction::Up);
        for batch in [down, drag, up] {
            assert_eq!(batch.contacts[0].id, MOUSE_CONTACT);
        }
    }
}
