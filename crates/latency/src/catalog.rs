use std::collections::BTreeMap;
use std::time::Duration;

use latency_workshop_common::{LatencyError, LatencyMode, LatencyProfile};

/// Indexed by `LatencyMode::code()`.
static PROFILES: [LatencyProfile; 4] = [
    LatencyProfile {
        read_delay: Duration::ZERO,
        write_delay: Duration::ZERO,
        description: "No latency",
    },
    LatencyProfile {
        read_delay: Duration::from_millis(100),
        write_delay: Duration::from_millis(150),
        description: "Low latency (100ms read / 150ms write)",
    },
    LatencyProfile {
        read_delay: Duration::from_millis(250),
        write_delay: Duration::from_millis(400),
        description: "Medium latency (250ms read / 400ms write)",
    },
    LatencyProfile {
        read_delay: Duration::from_secs(1),
        write_delay: Duration::from_secs(3),
        description: "High latency (1s read / 3s write)",
    },
];

/// Read-only mapping from every [`LatencyMode`] to its profile.
pub struct LatencyProfileCatalog;

impl LatencyProfileCatalog {
    /// Profile for a mode. Total over the enum, so it cannot fail.
    #[inline]
    pub fn get_profile(mode: LatencyMode) -> &'static LatencyProfile {
        &PROFILES[mode.code() as usize]
    }

    /// Profile for a raw mode code. Unknown codes are an error, never a
    /// fallback to `NO_LATENCY`.
    pub fn get_profile_by_code(code: u8) -> Result<&'static LatencyProfile, LatencyError> {
        LatencyMode::from_code(code).map(Self::get_profile)
    }

    /// Owned snapshot of the whole table, in mode declaration order.
    pub fn list_profiles() -> BTreeMap<LatencyMode, LatencyProfile> {
        LatencyMode::ALL
            .into_iter()
            .map(|mode| (mode, *Self::get_profile(mode)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined_profiles() {
        let none = LatencyProfileCatalog::get_profile(LatencyMode::NoLatency);
        assert_eq!(none.read_delay, Duration::ZERO);
        assert_eq!(none.write_delay, Duration::ZERO);
        assert_eq!(none.description, "No latency");

        let low = LatencyProfileCatalog::get_profile(LatencyMode::LowLatency);
        assert_eq!(low.read_delay.as_secs_f64(), 0.1);
        assert_eq!(low.write_delay.as_secs_f64(), 0.15);
        assert_eq!(low.description, "Low latency (100ms read / 150ms write)");

        let medium = LatencyProfileCatalog::get_profile(LatencyMode::MediumLatency);
        assert_eq!(medium.read_delay.as_secs_f64(), 0.25);
        assert_eq!(medium.write_delay.as_secs_f64(), 0.4);
        assert_eq!(medium.description, "Medium latency (250ms read / 400ms write)");

        let high = LatencyProfileCatalog::get_profile(LatencyMode::HighLatency);
        assert_eq!(high.read_delay.as_secs_f64(), 1.0);
        assert_eq!(high.write_delay.as_secs_f64(), 3.0);
        assert_eq!(high.description, "High latency (1s read / 3s write)");
    }

    #[test]
    fn test_write_delay_not_below_read_delay() {
        for mode in LatencyMode::ALL {
            let p = LatencyProfileCatalog::get_profile(mode);
            assert!(p.write_delay >= p.read_delay, "{mode}");
        }
    }

    #[test]
    fn test_unknown_code_is_an_error() {
        assert_eq!(
            LatencyProfileCatalog::get_profile_by_code(7),
            Err(LatencyError::InvalidMode(7))
        );
        assert_eq!(
            LatencyProfileCatalog::get_profile_by_code(2).unwrap(),
            LatencyProfileCatalog::get_profile(LatencyMode::MediumLatency)
        );
    }

    #[test]
    fn test_list_profiles_is_a_snapshot() {
        let mut listed = LatencyProfileCatalog::list_profiles();
        assert_eq!(listed.len(), 4);
        assert_eq!(
            listed.keys().copied().collect::<Vec<_>>(),
            LatencyMode::ALL.to_vec()
        );

        listed.get_mut(&LatencyMode::HighLatency).unwrap().read_delay = Duration::ZERO;
        listed.remove(&LatencyMode::LowLatency);

        let high = LatencyProfileCatalog::get_profile(LatencyMode::HighLatency);
        assert_eq!(high.read_delay, Duration::from_secs(1));
        assert_eq!(LatencyProfileCatalog::list_profiles().len(), 4);
    }
}
