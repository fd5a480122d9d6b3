//=========================================================================
// Platform Subsystem
//
// Desktop host shell: drives a `Bridge` from a Winit event loop.
//
// Architecture:
// ```text
//  Main Thread (UI affinity):                  Any Thread:
//  ┌──────────────────────────────┐           ┌──────────────────┐
//  │  Winit Event Loop            │           │  Native Core     │
//  │   ↓                          │           │  (ChannelCore,   │
//  │  WinitHost                   │           │   worker, ...)   │
//  │   ├─ resumed/suspended       │           │                  │
//  │   │    → lifecycle, surface  │  CoreEvent│                  │
//  │   ├─ window_event            ├──────────►│                  │
//  │   │    → touch, mouse, keys  │           │                  │
//  │   └─ user_event/about_to_wait│  Command  │                  │
//  │        → pump_commands ◄─────┼───────────┤ CommandDispatcher│
//  │   ↓                          │  HostWake │                  │
//  │  WinitShell (Shell impl)     │◄──proxy───┤                  │
//  └──────────────────────────────┘           └──────────────────┘
// ```
//
// Lifecycle mapping:
// - First `resumed`   → Create, Start, Resume, surface created + sized
// - `suspended`       → surface destroyed, Pause, Stop
// - Later `resumed`   → Start, Resume, surface re-created
// - `exiting`         → surface destroyed, Pause/Stop if needed, Destroy
//
// Key Design Decisions:
// - **Window created lazily** in `resumed()`, as Winit requires on mobile
// - **Mouse as touch**: the left button acts as contact 0 so desktop
//   builds of touch-driven cores work unchanged; real touches take
//   contacts from 1 up
// - **Commands pumped after every callback** plus on wake-up, so a
//   command never waits for the next OS event
// - **Finish is deferred**: `WinitShell` only flags the request; the
//   loop exits after the pump and `exiting()` reports the teardown
//
//=========================================================================

//=== Submodules ==========================================================

mod event_mapper;
mod shell;
mod text_entry;

//=== External Crates =====================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Mutex;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, Ime, KeyEvent, MouseButton, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::bridge::{Bridge, BridgeBuilder};
use crate::core::errors::BridgeError;
use crate::core::files::FileSystemContext;
use crate::core::input::Key;
use crate::core::native_core::NativeCore;
use crate::core::surface::{PixelFormat, SurfaceHandle, MAIN_SLOT};
use event_mapper::{
    key_action, mouse_button_batch, mouse_drag_batch, physical_to_key, TouchContacts,
    DESKTOP_SCAN_CODE,
};
use shell::{render_entry, WinitShell, WINDOW_TITLE};
use text_entry::{EntryOutcome, TextEntry};

//=== HostWake ============================================================

/// User event posted when the native core queues a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HostWake;

//=== PlatformError =======================================================

/// Desktop host setup and runtime errors.
///
/// These are fatal: the host cannot run without an event loop.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),

    /// Bridge setup was rejected.
    Bridge(BridgeError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::Bridge(e) => write!(f, "Bridge setup failed: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<BridgeError> for PlatformError {
    fn from(err: BridgeError) -> Self {
        Self::Bridge(err)
    }
}

//=== Entry Point =========================================================

/// Runs `core` inside a desktop window until the window closes or the
/// core finishes the shell.
///
/// `builder` is used as given, plus a waker that posts [`HostWake`] to
/// the loop.
///
/// # Errors
///
/// Returns [`PlatformError`] if the event loop cannot be created or
/// fails, or if `files` is rejected by the bridge.
///
/// # Panics
///
/// Panics if called off the main thread (macOS/iOS Winit requirement).
pub fn run<C: NativeCore>(
    builder: BridgeBuilder,
    core: C,
    files: FileSystemContext,
) -> Result<(), PlatformError> {
    debug!(target: "platform", "Starting Winit event loop");

    let event_loop = EventLoop::<HostWake>::with_user_event()
        .build()
        .map_err(PlatformError::EventLoopCreation)?;

    let proxy = Mutex::new(event_loop.create_proxy());
    let mut bridge = builder
        .with_waker(move || match proxy.lock() {
            Ok(proxy) => {
                if proxy.send_event(HostWake).is_err() {
                    trace!(target: "platform", "Event loop closed, wake dropped");
                }
            }
            Err(_) => warn!(target: "platform", "Wake proxy poisoned"),
        })
        .build(core);
    bridge.init_file_system(files)?;

    let mut host = WinitHost::new(bridge);
    event_loop
        .run_app(&mut host)
        .map_err(PlatformError::EventLoopExecution)
}

//=== WinitHost ===========================================================

/// Winit application handler owning the bridge.
///
/// # Fields
///
/// - `window`: Created lazily in `resumed()`, shared with `WinitShell`
/// - `entry`: Desktop text dialog, shared with `WinitShell`
/// - `foreground`: Start/Resume reported and not yet Pause/Stop
/// - `surface`: Handle of the bound main surface, if any
/// - `touches`: Winit touch id → bridge contact id
pub(crate) struct WinitHost<C: NativeCore> {
    bridge: Bridge<C>,
    window: Option<Rc<Window>>,
    entry: Rc<RefCell<TextEntry>>,
    exit_requested: Rc<Cell<bool>>,
    foreground: bool,
    surface: Option<SurfaceHandle>,
    surfaces_created: u64,
    touches: TouchContacts,
    cursor: (f32, f32),
    mouse_down: bool,
}

impl<C: NativeCore> WinitHost<C> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(bridge: Bridge<C>) -> Self {
        info!(target: "platform", "Desktop host initialized");
        Self {
            bridge,
            window: None,
            entry: Rc::new(RefCell::new(TextEntry::new())),
            exit_requested: Rc::new(Cell::new(false)),
            foreground: false,
            surface: None,
            surfaces_created: 0,
            touches: TouchContacts::new(),
            cursor: (0.0, 0.0),
            mouse_down: false,
        }
    }

    //--- Lifecycle Helpers ------------------------------------------------

    fn create_shell(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(800, 600));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                let window = Rc::new(window);
                let shell = WinitShell::new(
                    Rc::clone(&window),
                    Rc::clone(&self.entry),
                    Rc::clone(&self.exit_requested),
                );
                self.window = Some(window);
                self.bridge.on_create(Box::new(shell));
                true
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
                false
            }
        }
    }

    fn foreground(&mut self) {
        if !self.foreground {
            self.bridge.on_start();
            self.bridge.on_resume();
            self.foreground = true;
        }
    }

    fn background(&mut self) {
        if self.foreground {
            self.bridge.on_pause();
            self.bridge.on_stop();
            self.foreground = false;
        }
    }

    fn attach_surface(&mut self) {
        let size = match (&self.window, self.surface) {
            (Some(window), None) => window.inner_size(),
            _ => return,
        };

        self.surfaces_created += 1;
        let surface = SurfaceHandle::from_raw(self.surfaces_created);
        self.bridge.on_surface_created(MAIN_SLOT, surface);
        self.bridge
            .on_surface_changed(MAIN_SLOT, surface, PixelFormat::RGBA_8888, size.width, size.height);
        self.surface = Some(surface);
    }

    fn detach_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            let active = self.touches.active_count();
            if active > 0 {
                debug!(target: "platform::input", "Dropping {} active touches", active);
            }
            self.touches.clear();
            self.mouse_down = false;
            self.bridge.on_surface_destroyed(MAIN_SLOT, surface);
        }
    }

    //--- Input Helpers ----------------------------------------------------

    fn handle_key(&mut self, event: &KeyEvent) {
        let key = physical_to_key(event.physical_key);
        self.route_key(key, event.state, event.text.as_deref());
    }

    /// Sends a key to the text entry or the native core. Releases follow
    /// their press, so the core never sees an Up without its Down.
    fn route_key(&mut self, key: Key, state: ElementState, text: Option<&str>) {
        let pressed = state.is_pressed();
        if self.entry.borrow_mut().claims_key(key, pressed) {
            if pressed {
                self.edit_entry(key, text);
            }
            return;
        }

        trace!(target: "platform::input", "{:?} {:?}", key, state);
        self.bridge
            .on_key(key_action(state), key.host_code(), DESKTOP_SCAN_CODE);
    }

    fn handle_touch(&mut self, phase: TouchPhase, id: u64, x: f64, y: f64) {
        let batch = self.touches.batch(phase, id, x, y);
        self.bridge.on_pointer(&batch);
    }

    fn edit_entry(&mut self, key: Key, text: Option<&str>) {
        let outcome = {
            let mut entry = self.entry.borrow_mut();
            match entry.handle_key(key) {
                Some(outcome) => outcome,
                None => {
                    if let Some(text) = text {
                        entry.insert(text);
                    }
                    EntryOutcome::Editing
                }
            }
        };
        self.refresh_entry();

        match outcome {
            EntryOutcome::Confirmed(text) => self.bridge.on_text_confirmed(&text),
            EntryOutcome::Cancelled => self.bridge.on_text_cancelled(),
            EntryOutcome::Editing => {}
        }
    }

    fn commit_text(&mut self, text: &str) {
        self.entry.borrow_mut().insert(text);
        self.refresh_entry();
    }

    fn refresh_entry(&self) {
        if let Some(window) = &self.window {
            render_entry(window, &self.entry.borrow());
        }
    }

    fn handle_mouse_button(&mut self, state: ElementState) {
        // Releases that started outside the window have no matching Down.
        if !state.is_pressed() && !self.mouse_down {
            return;
        }
        self.mouse_down = state.is_pressed();

        let (x, y) = self.cursor;
        self.bridge.on_pointer(&mouse_button_batch(state, x, y));
    }

    //--- Command Pump -----------------------------------------------------

    fn pump(&mut self, event_loop: &ActiveEventLoop) {
        let executed = self.bridge.pump_commands();
        if executed > 0 {
            trace!(target: "platform", "Executed {} commands", executed);
        }

        if self.exit_requested.get() && !event_loop.exiting() {
            event_loop.exit();
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }
}

//=== Winit Integration ===================================================

impl<C: NativeCore> ApplicationHandler<HostWake> for WinitHost<C> {
    /// Called at startup and on every mobile-style resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() && !self.create_shell(event_loop) {
            return;
        }

        self.foreground();
        self.attach_surface();
        self.pump(event_loop);
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Suspended");
        self.detach_surface();
        self.background();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(surface) = self.surface {
                    self.bridge.on_surface_changed(
                        MAIN_SLOT,
                        surface,
                        PixelFormat::RGBA_8888,
                        size.width,
                        size.height,
                    );
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.bridge.on_configuration_changed();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                self.handle_key(&key_event);
            }

            WindowEvent::Ime(Ime::Commit(text)) => {
                self.commit_text(&text);
            }

            WindowEvent::Touch(touch) => {
                self.handle_touch(touch.phase, touch.id, touch.location.x, touch.location.y);
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.handle_mouse_button(state);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                if self.mouse_down {
                    let (x, y) = self.cursor;
                    self.bridge.on_pointer(&mouse_drag_batch(x, y));
                }
            }

            _ => {
                // Ignore: Focused, Moved, etc. (no bridge counterpart)
            }
        }

        self.pump(event_loop);
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, _event: HostWake) {
        self.pump(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.pump(event_loop);
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        info!(target: "platform", "Event loop exiting");
        self.detach_surface();
        self.background();
        if self.bridge.is_shell_bound() {
            self.bridge.on_destroy();
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyAction;
    use crate::core::native_core::CoreEvent;
    use crate::test_support::channel_core;

    //=====================================================================
    // WinitHost Tests
    //=====================================================================

    #[test]
    fn host_creation() {
        let (core, _rx) = channel_core();
        let host = WinitHost::new(BridgeBuilder::new().build(core));

        assert!(host.window().is_none(), "Window should be created lazily");
        assert!(!host.foreground);
        assert!(host.surface.is_none());
    }

    #[test]
    fn surface_helpers_need_a_window() {
        let (core, rx) = channel_core();
        let mut host = WinitHost::new(BridgeBuilder::new().build(core));

        host.attach_surface();
        host.detach_surface();

        assert!(crate::test_support::drain_events(&rx).is_empty());
        assert_eq!(host.surfaces_created, 0);
    }

    #[test]
    fn stray_mouse_release_is_ignored() {
        let (core, rx) = channel_core();
        let mut host = WinitHost::new(BridgeBuilder::new().build(core));

        host.handle_mouse_button(ElementState::Released);
        assert!(crate::test_support::drain_events(&rx).is_empty());

        host.handle_mouse_button(ElementState::Pressed);
        host.handle_mouse_button(ElementState::Released);
        assert_eq!(crate::test_support::drain_events(&rx).len(), 2);
    }

    #[test]
    fn keys_closing_the_entry_never_reach_the_core() {
        let (core, rx) = channel_core();
        let mut host = WinitHost::new(BridgeBuilder::new().build(core));
        host.entry.borrow_mut().open("name", 4);

        host.route_key(Key::Enter, ElementState::Pressed, None);
        assert!(!host.entry.borrow().is_open());
        host.route_key(Key::Enter, ElementState::Released, None);
        assert!(crate::test_support::drain_events(&rx).is_empty());

        host.route_key(Key::Enter, ElementState::Pressed, None);
        host.route_key(Key::Enter, ElementState::Released, None);
        let events = crate::test_support::drain_events(&rx);
        let actions: Vec<_> = events
            .iter()
            .map(|event| match event {
                CoreEvent::Key(key) => key.action,
                other => panic!("Unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(actions, vec![KeyAction::Down, KeyAction::Up]);
    }

    #[test]
    fn touches_use_contacts_after_the_mouse() {
        let (core, rx) = channel_core();
        let mut host = WinitHost::new(BridgeBuilder::new().build(core));

        host.handle_touch(TouchPhase::Started, 0, 1.0, 2.0);
        host.handle_touch(TouchPhase::Started, u64::MAX, 3.0, 4.0);
        host.handle_touch(TouchPhase::Ended, 0, 1.0, 2.0);

        let contacts: Vec<_> = crate::test_support::drain_events(&rx)
            .iter()
            .map(|event| match event {
                CoreEvent::Touch(touch) => touch.contact.id,
                other => panic!("Unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(contacts, vec![1, 2, 1]);
        assert_eq!(host.touches.active_count(), 1);
    }

    //=====================================================================
    // PlatformError Tests
    //=====================================================================

    #[test]
    fn platform_error_is_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PlatformError>();
    }

    #[test]
    fn platform_error_wraps_bridge_error() {
        let err = PlatformError::from(BridgeError::FileSystemAlreadyInitialized);

        assert!(matches!(err, PlatformError::Bridge(_)));
        assert!(err.to_string().starts_with("Bridge setup failed"));
    }
}
