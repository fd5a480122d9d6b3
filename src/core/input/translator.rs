//=========================================================================
// Input Translator
//=========================================================================
//
// Converts host pointer batches into canonical touch events.
//
// Architecture:
//   PointerBatch → InputTranslator → TouchEvent* → Native Core
//
// Rules:
// - Down / PointerDown  → one Down for the action contact
// - Move                → one Move per listed contact, host order
// - Up / PointerUp / Cancel → one Up for the action contact
// - Anything else       → nothing
//
// The active-contact set is bookkeeping for diagnostics only; it never
// changes what is emitted.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::event::{
    ContactId, KeyAction, KeyEvent, PointerAction, PointerBatch, TouchEvent, TouchPhase,
};

//=== InputTranslator =====================================================

/// Stateless-in-effect translator from host input to canonical events.
pub(crate) struct InputTranslator {
    active: Vec<ContactId>,
}

impl InputTranslator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            active: Vec::with_capacity(10),
        }
    }

    //--- Pointer Translation ----------------------------------------------

    /// Emits the canonical events for one host batch, in order.
    ///
    /// Returns the number of events emitted.
    pub(crate) fn translate_pointer<F>(&mut self, batch: &PointerBatch, mut emit: F) -> usize
    where
        F: FnMut(TouchEvent),
    {
        let phase = match batch.action {
            PointerAction::Down | PointerAction::PointerDown => TouchPhase::Down,
            PointerAction::Up | PointerAction::PointerUp | PointerAction::Cancel => TouchPhase::Up,
            PointerAction::Move => {
                for contact in &batch.contacts {
                    if !self.active.contains(&contact.id) {
                        trace!(target: "bridge::input", "Move for inactive contact {}", contact.id);
                    }
                    emit(TouchEvent {
                        phase: TouchPhase::Move,
                        contact: *contact,
                    });
                }
                return batch.contacts.len();
            }
            PointerAction::Other(code) => {
                trace!(target: "bridge::input", "Ignoring pointer action {}", code);
                return 0;
            }
        };

        let Some(contact) = batch.action_contact() else {
            warn!(
                target: "bridge::input",
                "Pointer {:?} names index {} but batch has {} contacts",
                batch.action,
                batch.action_index,
                batch.contacts.len()
            );
            return 0;
        };

        match phase {
            TouchPhase::Down => {
                if self.active.contains(&contact.id) {
                    warn!(target: "bridge::input", "Contact {} went down twice", contact.id);
                } else {
                    self.active.push(contact.id);
                }
            }
            _ => self.active.retain(|id| *id != contact.id),
        }

        trace!(target: "bridge::input", "{:?} contact {}", phase, contact.id);
        emit(TouchEvent {
            phase,
            contact: *contact,
        });
        1
    }

    //--- Key Translation --------------------------------------------------

    /// One key callback, one key event.
    pub(crate) fn translate_key(&self, action: KeyAction, key_code: i32, scan_code: i32) -> KeyEvent {
        KeyEvent {
            action,
            key_code,
            scan_code,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn active_contacts(&self) -> &[ContactId] {
        &self.active
    }

    /// Forgets all contacts, e.g. when the surface goes away mid-gesture.
    pub(crate) fn reset(&mut self) {
        self.active.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
