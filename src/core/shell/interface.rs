//=========================================================================
// Shell Interface
//=========================================================================
//
// The host-shell actions the bridge can perform, and the value types
// those actions carry.
//
// A `Shell` is owned by the bridge on the UI-affinity context for the
// lifetime of one Create → Destroy cycle. Implementations never need to
// be `Send`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::BitOr;

//=== Orientation =========================================================

/// Screen-orientation constraint requested by the native core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Follow the user's rotation preference.
    User,
    Landscape,
    Portrait,

    /// Follow the sensor; also the catch-all for unknown values.
    SensorDefault,
}

impl Orientation {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::User,
            1 => Self::Landscape,
            2 => Self::Portrait,
            _ => Self::SensorDefault,
        }
    }
}

//=== SystemUiFlags =======================================================

/// System-bar visibility flags applied to the shell's root view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SystemUiFlags(u32);

impl SystemUiFlags {
    pub const NONE: Self = Self(0);
    pub const LOW_PROFILE: Self = Self(0x0001);
    pub const HIDE_NAVIGATION: Self = Self(0x0002);
    pub const FULLSCREEN: Self = Self(0x0004);
    pub const LAYOUT_STABLE: Self = Self(0x0100);
    pub const LAYOUT_HIDE_NAVIGATION: Self = Self(0x0200);
    pub const LAYOUT_FULLSCREEN: Self = Self(0x0400);
    pub const IMMERSIVE_STICKY: Self = Self(0x1000);

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SystemUiFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

//=== WindowChromeMode ====================================================

/// Display mode requested through `SetWindowType`.
///
/// Recorded by the bridge so it can be reapplied after the text dialog
/// closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowChromeMode {
    #[default]
    Normal,
    Fullscreen,
    Desktop,
    Resizable,
}

impl WindowChromeMode {
    /// Decodes a raw mode; unknown values fall back to `Normal`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Fullscreen,
            2 => Self::Desktop,
            3 => Self::Resizable,
            _ => Self::Normal,
        }
    }

    /// Flags that realize this mode on the root view.
    ///
    /// Fullscreen hides both bars in sticky immersive mode; every other
    /// mode keeps the bars and only lays content out behind them.
    pub fn system_ui_flags(self) -> SystemUiFlags {
        let layout = SystemUiFlags::LAYOUT_STABLE
            | SystemUiFlags::LAYOUT_HIDE_NAVIGATION
            | SystemUiFlags::LAYOUT_FULLSCREEN;

        match self {
            Self::Fullscreen => {
                layout
                    | SystemUiFlags::HIDE_NAVIGATION
                    | SystemUiFlags::FULLSCREEN
                    | SystemUiFlags::LOW_PROFILE
                    | SystemUiFlags::IMMERSIVE_STICKY
            }
            Self::Normal | Self::Desktop | Self::Resizable => layout,
        }
    }
}

//=== KeyboardClass =======================================================

/// Physical keyboard classification from the host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyboardClass {
    #[default]
    Undefined,
    NoKeys,
    Qwerty,
    TwelveKey,
}

impl KeyboardClass {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::NoKeys,
            2 => Self::Qwerty,
            3 => Self::TwelveKey,
            _ => Self::Undefined,
        }
    }

    pub fn as_raw(self) -> i32 {
        match self {
            Self::Undefined => 0,
            Self::NoKeys => 1,
            Self::Qwerty => 2,
            Self::TwelveKey => 3,
        }
    }
}

//=== HostConfiguration ===================================================

/// Host state answered by the query responder.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HostConfiguration {
    /// Display density scale factor (1.0 = baseline).
    pub density: f32,
    pub keyboard: KeyboardClass,
}

//=== TextDialogState =====================================================

/// State of the modal single-line text entry overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDialogState {
    pub visible: bool,
    pub initial_text: String,

    /// Cursor position in characters.
    pub cursor_position: usize,
}

impl TextDialogState {
    /// A visible dialog pre-filled with `text`, cursor at the end.
    pub fn showing(text: String) -> Self {
        let cursor_position = text.chars().count();
        Self {
            visible: true,
            initial_text: text,
            cursor_position,
        }
    }
}

//=== Shell ===============================================================

/// Host-shell actions performed on behalf of the native core.
///
/// Every method runs on the UI-affinity context.
pub trait Shell {
    /// Begins tearing down the shell. The host follows up with the
    /// usual Pause / Stop / Destroy callbacks.
    fn finish(&mut self);

    /// Gives the main rendering surface input focus.
    fn request_focus(&mut self);

    /// Shows or hides the soft input surface for the main surface.
    fn show_soft_input(&mut self, show: bool);

    fn set_orientation(&mut self, orientation: Orientation);

    /// Displays (or refreshes) the text entry overlay.
    fn show_text_dialog(&mut self, dialog: &TextDialogState);

    /// Closes the text entry overlay without confirmation.
    fn hide_text_dialog(&mut self);

    /// Applies system chrome for `mode` to the root view.
    fn apply_chrome(&mut self, mode: WindowChromeMode, flags: SystemUiFlags);

    /// Current density and keyboard configuration.
    fn configuration(&self) -> HostConfiguration;
}

//=========================================================================
// Unit Tests
//=========================================================================
