//=========================================================================
// Shell Context
//=========================================================================
//
// Explicit registration point for the single live shell.
//
// The UI side binds a shell at Create and clears it at Destroy. The
// native side (dispatcher, query responder) holds a clone of the same
// context and reads it lock-free:
//
// ```text
//   UI thread                         Native threads
//   ─────────                         ──────────────
//   bind()      ─┐                ┌─  current()
//   publish()    ├─► atomics ◄────┼─  density() / keyboard()
//   unbind()    ─┘                └─  begin_finish()
// ```
//
// Readers see the most recently published value, nothing stronger.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicI32, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use log::info;

//=== Internal Dependencies ===============================================

use super::interface::{HostConfiguration, KeyboardClass};

//=== ShellHandle =========================================================

/// Identifies one bound shell instance (one Create → Destroy cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShellHandle {
    generation: u64,
}

//=== ShellContext ========================================================

/// Shared, lock-free view of the currently bound shell.
#[derive(Debug, Clone)]
pub struct ShellContext {
    inner: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    /// Generation of the bound shell, 0 when none is bound.
    current: AtomicU64,
    next_generation: AtomicU64,

    /// Generation that began finishing, 0 when none did.
    finishing: AtomicU64,
    density_bits: AtomicU32,
    keyboard: AtomicI32,
}

impl ShellContext {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Shared {
                current: AtomicU64::new(0),
                next_generation: AtomicU64::new(1),
                finishing: AtomicU64::new(0),
                density_bits: AtomicU32::new(0),
                keyboard: AtomicI32::new(0),
            }),
        }
    }

    //--- UI Side ----------------------------------------------------------

    /// Registers a new shell and publishes its configuration.
    pub(crate) fn bind(&self, config: HostConfiguration) -> ShellHandle {
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);

        self.publish(config);
        self.inner.finishing.store(0, Ordering::Release);
        self.inner.current.store(generation, Ordering::Release);

        info!(target: "bridge", "Shell {} bound", generation);
        ShellHandle { generation }
    }

    /// Clears the registration; every later read sees no shell.
    pub(crate) fn unbind(&self) {
        let previous = self.inner.current.swap(0, Ordering::AcqRel);
        self.publish(HostConfiguration::default());
        self.inner.finishing.store(0, Ordering::Release);

        if previous != 0 {
            info!(target: "bridge", "Shell {} unbound", previous);
        }
    }

    /// Publishes fresh configuration values for queries.
    pub(crate) fn publish(&self, config: HostConfiguration) {
        self.inner.density_bits.store(config.density.to_bits(), Ordering::Release);
        self.inner.keyboard.store(config.keyboard.as_raw(), Ordering::Release);
    }

    //--- Any Thread -------------------------------------------------------

    /// The live shell, `None` when unbound or finishing.
    pub fn current(&self) -> Option<ShellHandle> {
        let generation = self.inner.current.load(Ordering::Acquire);
        if generation == 0 || self.inner.finishing.load(Ordering::Acquire) == generation {
            return None;
        }
        Some(ShellHandle { generation })
    }

    /// Marks `handle` as finishing. Later `current()` calls return `None`
    /// while that generation stays bound.
    ///
    /// The mark names its generation, so a finish racing a rebind can
    /// never hide the newer shell. Generations only grow, so a late mark
    /// from an older shell cannot undo a newer one either.
    pub(crate) fn begin_finish(&self, handle: ShellHandle) {
        self.inner.finishing.fetch_max(handle.generation, Ordering::AcqRel);
    }

    pub(crate) fn density(&self) -> f32 {
        f32::from_bits(self.inner.density_bits.load(Ordering::Acquire))
    }

    pub(crate) fn keyboard(&self) -> KeyboardClass {
        KeyboardClass::from_raw(self.inner.keyboard.load(Ordering::Acquire))
    }

    //--- Test Accessors ---------------------------------------------------

    /// Whether `handle` is the registered shell, finishing or not.
    #[cfg(test)]
    pub(crate) fn is_bound(&self, handle: ShellHandle) -> bool {
        self.inner.current.load(Ordering::Acquire) == handle.generation
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
