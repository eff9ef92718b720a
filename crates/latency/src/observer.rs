use latency_workshop_common::{LatencyMode, LatencyProfile};
use tracing::info;

/// Notified after every mode swap on a [`crate::LatencyManager`].
pub trait ModeObserver: Send + Sync {
    fn mode_changed(&self, previous: LatencyMode, current: LatencyMode, profile: &LatencyProfile);
}

impl<F> ModeObserver for F
where
    F: Fn(LatencyMode, LatencyMode, &LatencyProfile) + Send + Sync,
{
    fn mode_changed(&self, previous: LatencyMode, current: LatencyMode, profile: &LatencyProfile) {
        self(previous, current, profile)
    }
}

/// Logs each mode change at `info`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl ModeObserver for TracingObserver {
    fn mode_changed(&self, previous: LatencyMode, current: LatencyMode, profile: &LatencyProfile) {
        info!(
            %previous,
            %current,
            read_ms = profile.read_delay.as_millis() as u64,
            write_ms = profile.write_delay.as_millis() as u64,
            "latency mode changed"
        );
    }
}
