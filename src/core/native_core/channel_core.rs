//=========================================================================
// Channel Core
//=========================================================================
//
// `NativeCore` adapter for engines running on their own thread.
//
// Architecture:
//   Bridge (UI thread) → ChannelCore → Sender<CoreMessage>
//                                          ↓
//                           Engine thread ← Receiver<CoreMessage>
//
// Channel order is call order, so the engine observes the same stream
// the host produced. A disconnected receiver is logged and the message
// dropped; the UI thread never panics on engine shutdown.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::warn;

//=== Internal Dependencies ===============================================

use super::interface::{CoreEvent, NativeCore};
use crate::core::files::FileSystemContext;
use crate::core::shell::{CommandDispatcher, QueryResponder};

//=== CoreMessage =========================================================

/// Everything a channel-backed engine receives from the bridge.
#[derive(Debug, Clone)]
pub enum CoreMessage {
    /// Command and query endpoints for the engine's own use.
    Attached {
        commands: CommandDispatcher,
        queries: QueryResponder,
    },

    /// Asset access and storage roots.
    InitFileSystem(FileSystemContext),

    /// One event of the host → core stream.
    Event(CoreEvent),
}

//=== ChannelCore =========================================================

/// Forwards every bridge call into a crossbeam channel.
pub struct ChannelCore {
    sender: Sender<CoreMessage>,
}

impl ChannelCore {
    /// Unbounded channel; the UI thread never blocks on the engine.
    pub fn new() -> (Self, Receiver<CoreMessage>) {
        let (sender, receiver) = unbounded();
        (Self { sender }, receiver)
    }

    /// Bounded channel; the UI thread blocks while the engine is
    /// `capacity` messages behind.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_capacity(capacity: usize) -> (Self, Receiver<CoreMessage>) {
        assert!(capacity > 0, "Channel capacity must be positive");
        let (sender, receiver) = bounded(capacity);
        (Self { sender }, receiver)
    }

    fn forward(&self, message: CoreMessage) {
        if let Err(err) = self.sender.send(message) {
            warn!(target: "bridge", "Native core disconnected, dropping {:?}", err.into_inner());
        }
    }
}

impl NativeCore for ChannelCore {
    fn attach(&mut self, commands: CommandDispatcher, queries: QueryResponder) {
        self.forward(CoreMessage::Attached { commands, queries });
    }

    fn init_file_system(&mut self, files: FileSystemContext) {
        self.forward(CoreMessage::InitFileSystem(files));
    }

    fn on_event(&mut self, event: CoreEvent) {
        self.forward(CoreMessage::Event(event));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lifecycle::LifecycleEvent;

    #[test]
    fn events_arrive_in_order() {
        let (mut core, rx) = ChannelCore::new();

        core.on_event(CoreEvent::Lifecycle(LifecycleEvent::Create));
        core.on_event(CoreEvent::TextCancel);

        match rx.try_recv() {
            Ok(CoreMessage::Event(CoreEvent::Lifecycle(LifecycleEvent::Create))) => {}
            other => panic!("Expected Create, got {:?}", other),
        }
        match rx.try_recv() {
            Ok(CoreMessage::Event(CoreEvent::TextCancel)) => {}
            other => panic!("Expected TextCancel, got {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn disconnected_receiver_does_not_panic() {
        let (mut core, rx) = ChannelCore::new();
        drop(rx);

        core.on_event(CoreEvent::TextCancel);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = ChannelCore::with_capacity(0);
    }

    #[test]
    fn bounded_channel_delivers() {
        let (mut core, rx) = ChannelCore::with_capacity(4);
        core.on_event(CoreEvent::TextInput("hi".to_string()));

        match rx.try_recv() {
            Ok(CoreMessage::Event(CoreEvent::TextInput(text))) => assert_eq!(text, "hi"),
            other => panic!("Expected TextInput, got {:?}", other),
        }
    }
}
