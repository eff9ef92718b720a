use std::sync::Arc;

use latency_workshop_latency::LatencyManager;
use latency_workshop_service::UserService;

/// Static facts about the running API, reported by `/` and `/health`.
#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub cors_origins: Vec<String>,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            name: "Workshop API".to_string(),
            version: "1.0.0".to_string(),
            description: "Simple API for TanStack Query workshop".to_string(),
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub latency: LatencyManager,
    pub info: Arc<ApiInfo>,
}

impl AppState {
    /// The latency handle is taken from `users` so both always agree.
    pub fn new(users: UserService, info: ApiInfo) -> Self {
        Self {
            latency: users.latency().clone(),
            users,
            info: Arc::new(info),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latency_workshop_common::LatencyMode;
    use latency_workshop_store::MemoryUserStore;

    #[test]
    fn test_state_shares_latency_with_service() {
        let latency = LatencyManager::default();
        let users = UserService::new(Arc::new(MemoryUserStore::new()), latency.clone());
        let state = AppState::new(users, ApiInfo::default());

        latency.set_mode(LatencyMode::HighLatency);
        assert_eq!(state.latency.get_active_mode(), LatencyMode::HighLatency);
        assert_eq!(state.users.latency().get_active_mode(), LatencyMode::HighLatency);
    }
}
