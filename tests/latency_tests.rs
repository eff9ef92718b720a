use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use latency_workshop_common::{LatencyMode, LatencyProfile};
use latency_workshop_latency::{LatencyManager, LatencyProfileCatalog};

fn matches_one_mode(profile: &LatencyProfile) -> bool {
    LatencyMode::ALL.into_iter().any(|mode| {
        let expected = LatencyProfileCatalog::get_profile(mode);
        expected.read_delay == profile.read_delay
            && expected.write_delay == profile.write_delay
            && expected.description == profile.description
    })
}

// =========================================================================
// Readers racing a writer never see a profile mixed from two modes
// =========================================================================
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_torn_profiles_under_concurrent_switching() {
    let mgr = LatencyManager::default();
    let stop = Arc::new(AtomicBool::new(false));

    let writer = {
        let mgr = mgr.clone();
        let stop = stop.clone();
        tokio::spawn(async move {
            let mut i = 0usize;
            while !stop.load(Ordering::Relaxed) {
                mgr.set_mode(LatencyMode::ALL[i % LatencyMode::ALL.len()]);
                i += 1;
                if i % 64 == 0 {
                    tokio::task::yield_now().await;
                }
            }
            i
        })
    };

    let readers: Vec<_> = (0..16)
        .map(|_| {
            let mgr = mgr.clone();
            tokio::spawn(async move {
                for n in 0..5_000 {
                    let profile = mgr.get_active_profile();
                    assert!(matches_one_mode(profile), "torn profile: {profile:?}");

                    let status = mgr.status();
                    let expected = LatencyProfileCatalog::get_profile(status.current_mode);
                    assert_eq!(status.read_delay, expected.read_delay.as_secs_f64());
                    assert_eq!(status.write_delay, expected.write_delay.as_secs_f64());
                    assert_eq!(status.description, expected.description);

                    if n % 256 == 0 {
                        tokio::task::yield_now().await;
                    }
                }
            })
        })
        .collect();

    for reader in readers {
        reader.await.unwrap();
    }
    stop.store(true, Ordering::Relaxed);
    let switches = writer.await.unwrap();
    assert!(switches > 0);
}

// =========================================================================
// Delays suspend the task, not the thread: other tasks keep running
// =========================================================================
#[tokio::test(start_paused = true)]
async fn test_delay_yields_to_other_tasks() {
    let mgr = LatencyManager::new(LatencyMode::HighLatency);
    let progressed = Arc::new(AtomicBool::new(false));

    let slow = {
        let mgr = mgr.clone();
        tokio::spawn(async move { mgr.await_write_delay().await })
    };
    let fast = {
        let progressed = progressed.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            progressed.store(true, Ordering::SeqCst);
        })
    };

    fast.await.unwrap();
    assert!(progressed.load(Ordering::SeqCst));
    assert!(!slow.is_finished());
    assert_eq!(slow.await.unwrap(), Duration::from_secs(3));
}

// =========================================================================
// Many concurrent waiters share the same delay window
// =========================================================================
#[tokio::test(start_paused = true)]
async fn test_concurrent_reads_overlap() {
    let mgr = LatencyManager::new(LatencyMode::HighLatency);
    let start = tokio::time::Instant::now();

    let waiters: Vec<_> = (0..50)
        .map(|_| {
            let mgr = mgr.clone();
            tokio::spawn(async move { mgr.await_read_delay().await })
        })
        .collect();
    for w in waiters {
        assert_eq!(w.await.unwrap(), Duration::from_secs(1));
    }

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_secs(2));
}
