//=========================================================================
// Shell Bridge
//
// Main entry point for hosts: owns the native core and every UI-side
// bridge component.
//
// Architecture:
// ```text
//   BridgeBuilder ──build(core)──> Bridge ──────────────┐
//       │                            │                   │
//       ├─ with_max_text_len()       ├─ on_create() ..   │ CoreEvent
//       ├─ with_initial_window_mode()├─ on_pointer()     ├──────────► NativeCore
//       └─ with_waker()              ├─ on_surface_*()   │
//                                    └─ pump_commands()  │
//                                           ▲            │
//          CommandDispatcher (any thread) ──┘            │
//          QueryResponder   (any thread) ◄── ShellContext┘
// ```
//
// Every `on_*` method runs on the UI-affinity context and forwards to
// the native core synchronously, before returning to the host.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::errors::BridgeError;
use crate::core::files::FileSystemContext;
use crate::core::input::{InputTranslator, KeyAction, PointerBatch};
use crate::core::lifecycle::{LifecycleEvent, LifecycleMachine, LifecycleState};
use crate::core::native_core::{CoreEvent, NativeCore};
use crate::core::shell::{
    CommandDispatcher, Orientation, QueryResponder, QueuedCommand, Shell, ShellContext,
    ShellSession, TextDialogState, WindowChromeMode, Waker,
};
use crate::core::surface::{PixelFormat, SlotId, SurfaceChannel, SurfaceHandle};

//=== BridgeBuilder =======================================================

/// Builder for configuring and constructing a [`Bridge`].
///
/// # Default Values
///
/// - **Max text length**: 1000 characters per `TextInput`
/// - **Initial window mode**: `WindowChromeMode::Normal`
/// - **Waker**: none (the host pumps commands on its own schedule)
///
/// # Examples
///
/// ```no_run
/// use aetheric_shell_bridge::BridgeBuilder;
/// use aetheric_shell_bridge::core::native_core::ChannelCore;
/// use aetheric_shell_bridge::core::shell::WindowChromeMode;
///
/// let (core, engine_rx) = ChannelCore::new();
/// let bridge = BridgeBuilder::new()
///     .with_max_text_len(256)
///     .with_initial_window_mode(WindowChromeMode::Fullscreen)
///     .build(core);
/// # drop((bridge, engine_rx));
/// ```
pub struct BridgeBuilder {
    max_text_len: usize,
    initial_window_mode: WindowChromeMode,
    waker: Option<Waker>,
}

impl BridgeBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            max_text_len: 1000,
            initial_window_mode: WindowChromeMode::Normal,
            waker: None,
        }
    }

    /// Caps the characters forwarded in a `TextInput` event.
    ///
    /// Longer confirmations are truncated on a character boundary.
    ///
    /// # Panics
    ///
    /// Panics if `len == 0`.
    pub fn with_max_text_len(mut self, len: usize) -> Self {
        assert!(len > 0, "Max text length must be positive");
        self.max_text_len = len;
        self
    }

    /// Window mode recorded before the native core sets one.
    ///
    /// This is the mode reapplied after the text dialog closes if the
    /// core never issues `SetWindowType`.
    pub fn with_initial_window_mode(mut self, mode: WindowChromeMode) -> Self {
        self.initial_window_mode = mode;
        self
    }

    /// Hook run after every queued command, from the issuing thread.
    ///
    /// Hosts use it to wake their UI loop so it calls
    /// [`Bridge::pump_commands`].
    pub fn with_waker<F>(mut self, waker: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.waker = Some(std::sync::Arc::new(waker));
        self
    }

    /// Builds the bridge and attaches `core` to its command and query
    /// endpoints.
    pub fn build<C: NativeCore>(self, mut core: C) -> Bridge<C> {
        info!(
            target: "bridge",
            "Building bridge (max text: {}, window mode: {:?})",
            self.max_text_len,
            self.initial_window_mode
        );

        let context = ShellContext::new();
        let (sender, commands) = unbounded();
        let dispatcher = CommandDispatcher::new(context.clone(), sender, self.waker);

        core.attach(dispatcher.clone(), QueryResponder::new(context.clone()));

        Bridge {
            core,
            max_text_len: self.max_text_len,
            initial_window_mode: self.initial_window_mode,
            lifecycle: LifecycleMachine::new(),
            input: InputTranslator::new(),
            surface: SurfaceChannel::new(),
            context,
            session: None,
            dispatcher,
            commands,
            files_initialized: false,
            warned_uninitialized: false,
        }
    }
}

impl Default for BridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Bridge ==============================================================

/// The UI-side half of the bridge.
///
/// Owns the native core, the bound shell (if any) and all translation
/// state. Not `Send`: it lives on the host's UI-affinity context.
pub struct Bridge<C: NativeCore> {
    core: C,
    max_text_len: usize,
    initial_window_mode: WindowChromeMode,
    lifecycle: LifecycleMachine,
    input: InputTranslator,
    surface: SurfaceChannel,
    context: ShellContext,
    session: Option<ShellSession>,
    dispatcher: CommandDispatcher,
    commands: Receiver<QueuedCommand>,
    files_initialized: bool,
    warned_uninitialized: bool,
}

impl<C: NativeCore> Bridge<C> {
    //--- Initialization ---------------------------------------------------

    /// Hands asset access and storage roots to the native core.
    ///
    /// Must be called once, before the first lifecycle event.
    pub fn init_file_system(&mut self, files: FileSystemContext) -> Result<(), BridgeError> {
        if self.files_initialized {
            return Err(BridgeError::FileSystemAlreadyInitialized);
        }

        info!(
            target: "bridge",
            "File system: local {}, external {}",
            files.local_path().display(),
            files.external_path().display()
        );
        self.core.init_file_system(files);
        self.files_initialized = true;
        Ok(())
    }

    //--- Lifecycle --------------------------------------------------------

    /// Binds `shell` and reports `AppCreate`.
    pub fn on_create(&mut self, shell: Box<dyn Shell>) {
        if let Some(mut replaced) = self.session.take() {
            warn!(target: "bridge::lifecycle", "Create while a shell is bound, replacing it");
            if replaced.close_dialog(true) {
                self.core.on_event(CoreEvent::TextCancel);
            }
        }

        let handle = self.context.bind(shell.configuration());
        self.session = Some(ShellSession::new(handle, shell, self.initial_window_mode));
        self.forward_lifecycle(LifecycleEvent::Create);
    }

    pub fn on_start(&mut self) {
        self.forward_lifecycle(LifecycleEvent::Start);
    }

    pub fn on_resume(&mut self) {
        self.forward_lifecycle(LifecycleEvent::Resume);
    }

    pub fn on_pause(&mut self) {
        self.forward_lifecycle(LifecycleEvent::Pause);
    }

    pub fn on_stop(&mut self) {
        self.forward_lifecycle(LifecycleEvent::Stop);
    }

    /// Unbinds the shell and reports `AppDestroy`.
    ///
    /// An open text dialog dies with the shell and is reported as
    /// `TextCancel` first.
    pub fn on_destroy(&mut self) {
        if let Some(mut session) = self.session.take() {
            if session.close_dialog(true) {
                self.core.on_event(CoreEvent::TextCancel);
            }
        }

        self.context.unbind();
        self.input.reset();
        self.forward_lifecycle(LifecycleEvent::Destroy);
    }

    fn forward_lifecycle(&mut self, event: LifecycleEvent) {
        if !self.files_initialized && !self.warned_uninitialized {
            warn!(target: "bridge::lifecycle", "Lifecycle event before init_file_system");
            self.warned_uninitialized = true;
        }

        self.lifecycle.transition(event);
        self.core.on_event(CoreEvent::Lifecycle(event));
    }

    //--- Surface ----------------------------------------------------------

    pub fn on_surface_created(&mut self, slot: SlotId, surface: SurfaceHandle) {
        let event = self.surface.created(slot, surface);
        self.core.on_event(event);
    }

    pub fn on_surface_changed(
        &mut self,
        slot: SlotId,
        surface: SurfaceHandle,
        format: PixelFormat,
        width: u32,
        height: u32,
    ) {
        if let Some(event) = self.surface.changed(slot, surface, format, width, height) {
            self.core.on_event(event);
        }
    }

    pub fn on_surface_destroyed(&mut self, slot: SlotId, surface: SurfaceHandle) {
        if let Some(event) = self.surface.destroyed(slot, surface) {
            let down = self.input.active_contacts().len();
            if down > 0 {
                debug!(target: "bridge::input", "Surface lost with {} contacts down", down);
            }
            self.input.reset();
            self.core.on_event(event);
        }
    }

    //--- Input ------------------------------------------------------------

    /// Translates one host pointer batch; returns the events emitted.
    pub fn on_pointer(&mut self, batch: &PointerBatch) -> usize {
        let core = &mut self.core;
        self.input
            .translate_pointer(batch, |event| core.on_event(CoreEvent::Touch(event)))
    }

    pub fn on_key(&mut self, action: KeyAction, key_code: i32, scan_code: i32) {
        let event = self.input.translate_key(action, key_code, scan_code);
        trace!(target: "bridge::input", "{:?}", event);
        self.core.on_event(CoreEvent::Key(event));
    }

    //--- Text Dialog ------------------------------------------------------

    /// The user confirmed the text dialog with `text`.
    pub fn on_text_confirmed(&mut self, text: &str) {
        if !self.close_dialog(false) {
            return;
        }
        let text = truncate_chars(text, self.max_text_len);
        self.core.on_event(CoreEvent::TextInput(text));
    }

    /// The user dismissed the text dialog.
    pub fn on_text_cancelled(&mut self) {
        if self.close_dialog(false) {
            self.core.on_event(CoreEvent::TextCancel);
        }
    }

    /// Closes the text dialog from the host side, as a cancellation.
    pub fn dismiss_text_dialog(&mut self) {
        if self.close_dialog(true) {
            self.core.on_event(CoreEvent::TextCancel);
        }
    }

    fn close_dialog(&mut self, programmatic: bool) -> bool {
        let closed = self
            .session
            .as_mut()
            .map(|session| session.close_dialog(programmatic))
            .unwrap_or(false);

        if !closed {
            debug!(target: "bridge::commands", "No text dialog open");
        }
        closed
    }

    //--- Configuration ----------------------------------------------------

    /// Re-reads density and keyboard class from the bound shell.
    pub fn on_configuration_changed(&mut self) {
        if let Some(session) = &self.session {
            let config = session.configuration();
            debug!(target: "bridge::queries", "Configuration changed: {:?}", config);
            self.context.publish(config);
        }
    }

    //--- Commands ---------------------------------------------------------

    /// Executes every queued native-core command, in issue order.
    ///
    /// Commands issued against a shell that is no longer bound are
    /// dropped. Returns the number executed.
    pub fn pump_commands(&mut self) -> usize {
        let mut executed = 0;

        while let Ok(queued) = self.commands.try_recv() {
            match self.session.as_mut() {
                Some(session) if session.handle() == queued.handle => {
                    if session.execute(queued.command) {
                        executed += 1;
                    }
                }
                _ => {
                    trace!(target: "bridge::commands", "Stale shell, dropping {:?}", queued.command);
                }
            }
        }

        executed
    }

    //--- Endpoints --------------------------------------------------------

    /// Another handle for issuing commands (any thread).
    pub fn dispatcher(&self) -> CommandDispatcher {
        self.dispatcher.clone()
    }

    /// Another handle for scalar queries (any thread).
    pub fn queries(&self) -> QueryResponder {
        QueryResponder::new(self.context.clone())
    }

    //--- Accessors --------------------------------------------------------

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    pub fn lifecycle_state(&self) -> Option<LifecycleState> {
        self.lifecycle.state()
    }

    pub fn is_shell_bound(&self) -> bool {
        self.session.is_some()
    }

    pub fn bound_surface(&self) -> Option<SlotId> {
        self.surface.bound_slot()
    }

    /// Recorded window mode of the bound shell.
    pub fn window_mode(&self) -> Option<WindowChromeMode> {
        self.session.as_ref().map(ShellSession::window_mode)
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.session.as_ref().and_then(ShellSession::orientation)
    }

    /// Text dialog state of the bound shell.
    pub fn text_dialog(&self) -> Option<&TextDialogState> {
        self.session.as_ref().map(ShellSession::dialog)
    }
}

//--- Helpers -------------------------------------------------------------

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
