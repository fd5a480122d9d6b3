//=========================================================================
// Aetheric Shell Bridge - Library Root
//
// Bidirectional bridge between a host application shell and a native
// engine core.
//
// Responsibilities:
// - Expose the bridge facade (`Bridge`, `BridgeBuilder`)
// - Expose the host-independent building blocks (`core`)
// - Provide a ready-made desktop host on top of Winit (`platform`)
//
// Typical usage:
// ```no_run
// use aetheric_shell_bridge::BridgeBuilder;
// use aetheric_shell_bridge::core::files::{DirectoryAssets, FileSystemContext};
// use aetheric_shell_bridge::core::native_core::ChannelCore;
// use std::sync::Arc;
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     let (core, _engine_rx) = ChannelCore::new();
//     let files = FileSystemContext::new(
//         Arc::new(DirectoryAssets::new("/opt/game/assets")),
//         "/var/lib/game",
//         "/home/player/.game",
//     )?;
//     aetheric_shell_bridge::platform::run(BridgeBuilder::new(), core, files)?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the event, command, query and lifecycle types. Hosts
// other than the bundled desktop one (a JNI shim, a test harness) build
// on these plus the `Bridge` facade.
//
// `platform` is the Winit desktop host.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `bridge` defines the facade owning the native core and the bound
// shell.
//
mod bridge;

#[cfg(test)]
mod test_support;

//--- Public Exports ------------------------------------------------------

pub use bridge::{Bridge, BridgeBuilder};
