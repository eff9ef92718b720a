use std::collections::BTreeMap;

use latency_workshop_common::{LatencyMode, LatencyProfile};
use serde::{Deserialize, Serialize};

use crate::catalog::LatencyProfileCatalog;
use crate::manager::LatencyManager;

/// Current mode plus its delays in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatencyStatus {
    pub current_mode: LatencyMode,
    pub read_delay: f64,
    pub write_delay: f64,
    pub description: String,
}

impl LatencyStatus {
    pub fn new(mode: LatencyMode, profile: &LatencyProfile) -> Self {
        Self {
            current_mode: mode,
            read_delay: profile.read_delay.as_secs_f64(),
            write_delay: profile.write_delay.as_secs_f64(),
            description: profile.description.to_string(),
        }
    }
}

/// One catalog entry, delays in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileInfo {
    pub read_delay: f64,
    pub write_delay: f64,
    pub description: String,
}

impl From<&LatencyProfile> for ProfileInfo {
    fn from(profile: &LatencyProfile) -> Self {
        Self {
            read_delay: profile.read_delay.as_secs_f64(),
            write_delay: profile.write_delay.as_secs_f64(),
            description: profile.description.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatencyModesInfo {
    pub current_mode: LatencyMode,
    pub available_modes: BTreeMap<LatencyMode, ProfileInfo>,
}

impl LatencyManager {
    /// Snapshot of the active mode. Mode and profile come from one load.
    pub fn status(&self) -> LatencyStatus {
        let mode = self.get_active_mode();
        LatencyStatus::new(mode, LatencyProfileCatalog::get_profile(mode))
    }

    pub fn modes_info(&self) -> LatencyModesInfo {
        LatencyModesInfo {
            current_mode: self.get_active_mode(),
            available_modes: LatencyProfileCatalog::list_profiles()
                .iter()
                .map(|(mode, profile)| (*mode, ProfileInfo::from(profile)))
                .collect(),
        }
    }
}
