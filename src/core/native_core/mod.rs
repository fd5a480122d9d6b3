//=========================================================================
// Native Core Boundary
//=========================================================================
//
// Defines what the bridge pushes into the native engine core, and a
// channel adapter for engines that live on their own thread.
//
// Components:
// - `interface`: the event stream and the `NativeCore` trait (the contract)
// - `channel_core`: crossbeam-backed `NativeCore` implementation
//
//=========================================================================

//=== Module Declarations =================================================

pub mod channel_core;
pub mod interface;

//=== Public API ==========================================================

pub use channel_core::{ChannelCore, CoreMessage};
pub use interface::{CoreEvent, NativeCore};
