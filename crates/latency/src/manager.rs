use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use latency_workshop_common::{LatencyError, LatencyMode, LatencyProfile};
use tracing::debug;

use crate::catalog::LatencyProfileCatalog;
use crate::observer::ModeObserver;

/// Which delay an operation pays before touching storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationClass {
    /// list / fetch
    Read,
    /// create / update / delete / reset
    Write,
}

impl fmt::Display for OperationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationClass::Read => write!(f, "read"),
            OperationClass::Write => write!(f, "write"),
        }
    }
}

/// Process-wide latency state, shared by cloning the handle.
///
/// The active mode lives in a single `AtomicU8`. Readers load the code and
/// resolve the profile from the static catalog on every lookup, so a reader
/// always sees both delays of exactly one mode, and a `set_mode` is visible
/// to the very next lookup.
#[derive(Clone)]
pub struct LatencyManager {
    inner: Arc<Inner>,
}

struct Inner {
    active: AtomicU8,
    default_mode: LatencyMode,
    observers: Vec<Arc<dyn ModeObserver>>,
}

impl LatencyManager {
    /// Create a manager starting in `default_mode`.
    pub fn new(default_mode: LatencyMode) -> Self {
        Self::with_observers(default_mode, Vec::new())
    }

    /// Create a manager that notifies `observers` after every mode change.
    pub fn with_observers(default_mode: LatencyMode, observers: Vec<Arc<dyn ModeObserver>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                active: AtomicU8::new(default_mode.code()),
                default_mode,
                observers,
            }),
        }
    }

    /// The mode `reset_to_default` returns to.
    pub fn default_mode(&self) -> LatencyMode {
        self.inner.default_mode
    }

    pub fn get_active_mode(&self) -> LatencyMode {
        decode(self.inner.active.load(Ordering::Acquire))
    }

    pub fn get_active_profile(&self) -> &'static LatencyProfile {
        LatencyProfileCatalog::get_profile(self.get_active_mode())
    }

    /// Atomically switch to `mode` and return its profile.
    pub fn set_mode(&self, mode: LatencyMode) -> &'static LatencyProfile {
        let previous = decode(self.inner.active.swap(mode.code(), Ordering::AcqRel));
        let profile = LatencyProfileCatalog::get_profile(mode);
        for observer in &self.inner.observers {
            observer.mode_changed(previous, mode, profile);
        }
        profile
    }

    /// Raw-code entry point. An unknown code fails before any state changes.
    pub fn set_mode_by_code(&self, code: u8) -> Result<&'static LatencyProfile, LatencyError> {
        let mode = LatencyMode::from_code(code)?;
        Ok(self.set_mode(mode))
    }

    pub fn reset_to_default(&self) -> &'static LatencyProfile {
        self.set_mode(self.inner.default_mode)
    }

    /// Delay currently configured for `class`.
    pub fn delay_for(&self, class: OperationClass) -> Duration {
        let profile = self.get_active_profile();
        match class {
            OperationClass::Read => profile.read_delay,
            OperationClass::Write => profile.write_delay,
        }
    }

    /// Suspend for the delay active at the moment of the call.
    ///
    /// The delay is resolved once up front; a mode change while suspended
    /// does not alter it. Zero delays return without touching the timer.
    /// Dropping the future cancels the wait.
    pub async fn await_delay(&self, class: OperationClass) -> Duration {
        let delay = self.delay_for(class);
        if !delay.is_zero() {
            debug!(class = %class, delay_ms = delay.as_millis() as u64, "simulating latency");
            tokio::time::sleep(delay).await;
        }
        delay
    }

    pub async fn await_read_delay(&self) -> Duration {
        self.await_delay(OperationClass::Read).await
    }

    pub async fn await_write_delay(&self) -> Duration {
        self.await_delay(OperationClass::Write).await
    }
}

// The cell is only ever written with `LatencyMode::code()`.
fn decode(code: u8) -> LatencyMode {
    match LatencyMode::from_code(code) {
        Ok(mode) => mode,
        Err(err) => unreachable!("{err}"),
    }
}

impl Default for LatencyManager {
    fn default() -> Self {
        Self::new(LatencyMode::default())
    }
}

impl fmt::Debug for LatencyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatencyManager")
            .field("active", &self.get_active_mode())
            .field("default_mode", &self.inner.default_mode)
            .field("observers", &self.inner.observers.len())
            .finish()
    }
}
