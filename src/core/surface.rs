//=========================================================================
// Surface Channel
//=========================================================================
//
// Binds the host's drawable surface to a slot and reports creation,
// resize and destruction to the native core.
//
// The channel remembers which slot is bound, never the surface handle
// itself: the handle lives only for the call that carries it.
//
// Calls that reference an unbound slot are dropped, so the native core
// never sees a resize or destroy for a surface it was not told about.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::native_core::CoreEvent;

//=== SlotId ==============================================================

/// Rendering slot a surface is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub i32);

/// The only slot in use; other values are reserved for multi-surface.
pub const MAIN_SLOT: SlotId = SlotId(0);

//=== SurfaceHandle =======================================================

/// Opaque host surface handle (a native window pointer or window id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> u64 {
        self.0
    }
}

//=== PixelFormat =========================================================

/// Host pixel format code, forwarded untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelFormat(pub i32);

impl PixelFormat {
    pub const UNKNOWN: Self = Self(0);
    pub const RGBA_8888: Self = Self(1);
    pub const RGBX_8888: Self = Self(2);
    pub const RGB_888: Self = Self(3);
    pub const RGB_565: Self = Self(4);
}

//=== SurfaceChannel ======================================================

pub(crate) struct SurfaceChannel {
    bound: Option<SlotId>,
}

impl SurfaceChannel {
    pub(crate) fn new() -> Self {
        Self { bound: None }
    }

    pub(crate) fn bound_slot(&self) -> Option<SlotId> {
        self.bound
    }

    /// Binds `slot` and produces the creation notice.
    pub(crate) fn created(&mut self, slot: SlotId, surface: SurfaceHandle) -> CoreEvent {
        if slot != MAIN_SLOT {
            warn!(target: "bridge::surface", "Surface created on reserved slot {:?}", slot);
        }
        if let Some(previous) = self.bound {
            warn!(target: "bridge::surface", "Rebinding slot {:?} without destroy", previous);
        }

        debug!(target: "bridge::surface", "Surface created on slot {:?}", slot);
        self.bound = Some(slot);
        CoreEvent::SurfaceCreated { slot, surface }
    }

    /// Resize notice, `None` if `slot` is not bound.
    pub(crate) fn changed(
        &mut self,
        slot: SlotId,
        surface: SurfaceHandle,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) -> Option<CoreEvent> {
        if self.bound != Some(slot) {
            warn!(target: "bridge::surface", "Dropping resize for unbound slot {:?}", slot);
            return None;
        }

        debug!(target: "bridge::surface", "Surface changed: {}x{} format {}", width, height, format.0);
        Some(CoreEvent::SurfaceChanged {
            slot,
            surface,
            format,
            width,
            height,
        })
    }

    /// Unbinds `slot` and produces the destruction notice.
    pub(crate) fn destroyed(&mut self, slot: SlotId, surface: SurfaceHandle) -> Option<CoreEvent> {
        if self.bound != Some(slot) {
            warn!(target: "bridge::surface", "Dropping destroy for unbound slot {:?}", slot);
            return None;
        }

        debug!(target: "bridge::surface", "Surface destroyed on slot {:?}", slot);
        self.bound = None;
        Some(CoreEvent::SurfaceDestroyed { slot, surface })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
