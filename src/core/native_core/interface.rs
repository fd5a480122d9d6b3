//=========================================================================
// Native Core Interface
//=========================================================================
//
// The contract between the bridge and the native engine core.
//
// Host → core traffic is a single ordered stream of `CoreEvent`s.
// Core → host traffic goes through the `CommandDispatcher` and
// `QueryResponder` handed over in `NativeCore::attach`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::files::FileSystemContext;
use crate::core::input::{KeyEvent, TouchEvent};
use crate::core::lifecycle::LifecycleEvent;
use crate::core::shell::{CommandDispatcher, QueryResponder};
use crate::core::surface::{PixelFormat, SlotId, SurfaceHandle};

//=== CoreEvent ===========================================================

/// One message of the host → core event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// Shell lifecycle transition (AppCreate .. AppDestroy).
    Lifecycle(LifecycleEvent),

    /// A surface was bound to `slot`; the core may start rendering.
    SurfaceCreated {
        slot: SlotId,
        surface: SurfaceHandle,
    },

    /// The bound surface changed format or size (physical pixels).
    SurfaceChanged {
        slot: SlotId,
        surface: SurfaceHandle,
        format: PixelFormat,
        width: u32,
        height: u32,
    },

    /// The surface is gone; the core must stop using it before returning.
    SurfaceDestroyed {
        slot: SlotId,
        surface: SurfaceHandle,
    },

    /// Canonical touch Down / Move / Up.
    Touch(TouchEvent),

    /// Key Down / Up.
    Key(KeyEvent),

    /// The text dialog was confirmed with this text.
    TextInput(String),

    /// The text dialog was dismissed without confirmation.
    TextCancel,
}

//=== NativeCore ==========================================================

/// The native engine core as seen from the bridge.
///
/// All methods are called on the UI-affinity context, synchronously, in
/// the order the host produced the underlying callbacks.
pub trait NativeCore {
    /// Hands the core its command and query endpoints.
    ///
    /// Called once, when the bridge is built. Both endpoints are `Send`
    /// and may be used from any thread.
    fn attach(&mut self, commands: CommandDispatcher, queries: QueryResponder) {
        let _ = (commands, queries);
    }

    /// Supplies asset access and storage roots.
    ///
    /// Called at most once, before the first lifecycle event.
    fn init_file_system(&mut self, files: FileSystemContext);

    /// Receives the next event of the host → core stream.
    fn on_event(&mut self, event: CoreEvent);
}
