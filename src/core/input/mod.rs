//=========================================================================
// Input Translation
//=========================================================================
//
// Host pointer batches and key callbacks in, canonical touch and key
// events out.
//
// Components:
// - `event`: host batch types and canonical event types
// - `translator`: batch → event normalization
// - `keymap`: portable key identities for host key codes
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
pub mod keymap;
pub(crate) mod translator;

//=== Public API ==========================================================

pub use event::{
    ContactId, KeyAction, KeyEvent, PointerAction, PointerBatch, PointerContact, TouchEvent,
    TouchPhase,
};
pub use keymap::Key;

//=== Internal API ========================================================

pub(crate) use translator::InputTranslator;
