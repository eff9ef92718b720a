use std::sync::Arc;
use std::time::Instant;

use latency_workshop_common::{LatencyMode, NewUser};
use latency_workshop_latency::{LatencyManager, TracingObserver};
use latency_workshop_service::UserService;
use latency_workshop_store::MemoryUserStore;

/// Time one read and one write under every mode, in-process.
pub async fn run_demo() -> anyhow::Result<()> {
    println!("=== Latency Workshop Demo ===\n");

    let store = Arc::new(MemoryUserStore::new());
    store.seed_if_empty().await?;
    let latency = LatencyManager::with_observers(LatencyMode::NoLatency, vec![Arc::new(TracingObserver)]);
    let users = UserService::new(store, latency.clone());

    for (i, mode) in LatencyMode::ALL.into_iter().enumerate() {
        let profile = latency.set_mode(mode);
        println!("{mode}: {}", profile.description);

        let start = Instant::now();
        let listed = users.list_users().await?;
        println!("  list   -> {} users in {:?}", listed.len(), start.elapsed());

        let start = Instant::now();
        let created = users
            .create_user(NewUser {
                name: format!("Demo User {i}"),
                email: format!("demo{i}@example.com"),
                role: "Tester".to_string(),
            })
            .await?;
        println!("  create -> id {} in {:?}", created.id, start.elapsed());
    }

    latency.reset_to_default();
    println!("\nBack to {}.", latency.get_active_mode());
    Ok(())
}
