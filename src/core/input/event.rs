//=========================================================================
// Input Event Types
//
// Host-side pointer batches and the canonical touch/key events the
// bridge forwards to the native core.
//
// Event Flow:
// ```text
// Host Shell
//     ↓  PointerBatch (action + all active contacts)
// InputTranslator
//     ↓  TouchEvent (one per canonical Down / Move / Up)
// Native Core
// ```
//
// Contact identifiers are always the host's own; nothing in this module
// assigns or renumbers them.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::keymap::Key;

//=== ContactId ===========================================================

/// Host-assigned identifier of one physical touch point.
///
/// Stable from the contact's Down through its Up.
pub type ContactId = i32;

//=== PointerContact ======================================================

/// One contact as reported in a host pointer batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerContact {
    pub id: ContactId,
    pub x: f32,
    pub y: f32,
}

impl PointerContact {
    pub fn new(id: ContactId, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

//=== PointerAction =======================================================

/// What caused a host pointer batch.
///
/// Mirrors the host's masked action codes. `PointerDown` / `PointerUp`
/// are secondary contacts joining or leaving an ongoing gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    PointerDown,
    Move,
    Up,
    PointerUp,
    Cancel,

    /// Hover, outside-touch, scroll and other actions the bridge ignores.
    Other(i32),
}

impl PointerAction {
    /// Decodes a masked host action code.
    pub fn from_masked(code: i32) -> Self {
        match code {
            0 => Self::Down,
            1 => Self::Up,
            2 => Self::Move,
            3 => Self::Cancel,
            5 => Self::PointerDown,
            6 => Self::PointerUp,
            other => Self::Other(other),
        }
    }
}

//=== PointerBatch ========================================================

/// One host pointer callback.
///
/// `contacts` lists every contact currently on the surface in host
/// pointer-index order. `action_index` selects the contact whose
/// transition triggered the batch (meaningless for `Move`).
#[derive(Debug, Clone, PartialEq)]
pub struct PointerBatch {
    pub action: PointerAction,
    pub action_index: usize,
    pub contacts: Vec<PointerContact>,
}

impl PointerBatch {
    pub fn new(action: PointerAction, action_index: usize, contacts: Vec<PointerContact>) -> Self {
        Self {
            action,
            action_index,
            contacts,
        }
    }

    /// Single-contact batch, the common case for mouse and desktop touch.
    pub fn single(action: PointerAction, contact: PointerContact) -> Self {
        Self::new(action, 0, vec![contact])
    }

    /// The contact whose transition triggered this batch.
    pub fn action_contact(&self) -> Option<&PointerContact> {
        self.contacts.get(self.action_index)
    }
}

//=== TouchEvent ==========================================================

/// Canonical touch phase seen by the native core.
///
/// Host cancellation is reported as `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
}

/// One canonical touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub contact: PointerContact,
}

//=== KeyEvent ============================================================

/// Key transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
}

/// One key callback, forwarded 1:1.
///
/// `key_code` and `scan_code` are passed through verbatim; [`KeyEvent::key`]
/// offers the portable interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key_code: i32,
    pub scan_code: i32,
}

impl KeyEvent {
    /// Portable key identity for the host key code.
    pub fn key(&self) -> Key {
        Key::from_host_code(self.key_code)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
