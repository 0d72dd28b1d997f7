//! Timer-driven reporter tests on a paused clock.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tokio::time::{sleep, Duration};
use tower::ServiceExt;

use syncstat_core::error::{Result, SyncStatError};
use syncstat_core::{MetricsStore, Phase, ProgressReport};
use syncstat_server::report::{spawn_reporter, ProgressSink, TracingSink};
use syncstat_server::{app_state::AppState, config, router};

#[derive(Default)]
struct CaptureSink {
    reports: Mutex<Vec<ProgressReport>>,
}

impl CaptureSink {
    fn lines(&self) -> Vec<String> {
        self.reports.lock().unwrap().iter().map(|r| r.to_string()).collect()
    }

    fn phases(&self) -> Vec<Phase> {
        self.reports.lock().unwrap().iter().map(|r| r.phase()).collect()
    }
}

#[async_trait]
impl ProgressSink for CaptureSink {
    async fn emit(&self, report: &ProgressReport) -> Result<()> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

struct BrokenSink;

#[async_trait]
impl ProgressSink for BrokenSink {
    async fn emit(&self, _report: &ProgressReport) -> Result<()> {
        Err(SyncStatError::Sink("stdout closed".into()))
    }
}

async fn status_json(store: &Arc<MetricsStore>) -> Value {
    let cfg = config::load_from_str("version: 1\nadvanced:\n  log_interval: 0\n").unwrap();
    let app = router::build_router(AppState::new(cfg, Arc::clone(store)));
    let resp = app
        .oneshot(Request::builder().uri("/v1/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn applying_store() -> Arc<MetricsStore> {
    let store = Arc::new(MetricsStore::new("src:6379"));
    store.set_rdb_file_size(100);
    store.update_rdb_received_size(100);
    store.update_rdb_send_size(30);
    store
}

#[tokio::test(start_paused = true)]
async fn first_line_after_one_full_interval() {
    let store = applying_store();
    let sink = Arc::new(CaptureSink::default());
    let handle = spawn_reporter(Arc::clone(&store), 5, sink.clone());
    assert!(handle.is_enabled());

    sleep(Duration::from_millis(4_900)).await;
    assert!(sink.lines().is_empty());

    sleep(Duration::from_millis(200)).await;
    assert_eq!(sink.phases(), vec![Phase::ApplyingRdb]);

    sleep(Duration::from_secs(5)).await;
    assert_eq!(sink.lines().len(), 2);

    handle.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn applying_throughput_is_per_second_delta() {
    let store = applying_store();
    for _ in 0..100 {
        store.increment_allow_entries();
    }
    let sink = Arc::new(CaptureSink::default());
    let handle = spawn_reporter(Arc::clone(&store), 5, sink.clone());

    for _ in 0..50 {
        store.increment_allow_entries();
    }
    sleep(Duration::from_millis(5_100)).await;

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("syncing rdb. percent=[30.00]%"), "{}", lines[0]);
    assert!(lines[0].contains("allowOps=[10.00]"), "{}", lines[0]);
    assert!(lines[0].contains("disallowOps=[0.00]"), "{}", lines[0]);

    handle.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn unknown_rdb_size_emits_nothing_then_phases_follow_the_store() {
    let store = Arc::new(MetricsStore::default());
    let sink = Arc::new(CaptureSink::default());
    let handle = spawn_reporter(Arc::clone(&store), 1, sink.clone());

    store.update_rdb_received_size(10);
    sleep(Duration::from_millis(2_500)).await;
    assert!(sink.lines().is_empty());

    store.set_rdb_file_size(100);
    store.update_rdb_received_size(30);
    store.update_rdb_send_size(50);
    sleep(Duration::from_secs(1)).await;

    store.update_rdb_received_size(100);
    store.update_rdb_send_size(60);
    sleep(Duration::from_secs(1)).await;

    store.update_rdb_send_size(100);
    store.update_aof_received_offset(40);
    store.update_aof_applied_offset(25);
    sleep(Duration::from_secs(1)).await;

    assert_eq!(
        sink.phases(),
        vec![Phase::ReceivingRdb, Phase::ApplyingRdb, Phase::SyncingAof]
    );
    let lines = sink.lines();
    assert!(lines[0].starts_with("receiving rdb. percent=[30.00]%"), "{}", lines[0]);
    assert!(lines[2].contains("diff=[15]"), "{}", lines[2]);

    handle.stop().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn disabled_reporter_emits_nothing() {
    for seconds in [0, -5] {
        let store = applying_store();
        let sink = Arc::new(CaptureSink::default());
        let mut handle = spawn_reporter(Arc::clone(&store), seconds, sink.clone());
        assert!(!handle.is_enabled());

        for i in 0..1_000 {
            store.increment_allow_entries();
            store.update_entry_id(i);
        }
        sleep(Duration::from_secs(60)).await;
        assert!(sink.lines().is_empty());

        // a disabled reporter never finishes on its own
        let waited = tokio::time::timeout(Duration::from_secs(10), handle.finished()).await;
        assert!(waited.is_err());

        // the status endpoint keeps serving live values
        let v = status_json(&store).await;
        assert_eq!(v["allow_entries_count"], 1_000);
        assert_eq!(v["entry_id"], 999);

        store.increment_disallow_entries();
        let v = status_json(&store).await;
        assert_eq!(v["disallow_entries_count"], 1);

        assert!(sink.lines().is_empty());
        handle.stop().await.unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn sink_failure_ends_the_reporter() {
    let store = applying_store();
    let mut handle = spawn_reporter(Arc::clone(&store), 2, Arc::new(BrokenSink));

    let err = handle.finished().await.expect_err("must fail");
    assert!(matches!(err, SyncStatError::Sink(_)));
    assert!(err.is_fatal());
}

#[tokio::test(start_paused = true)]
async fn stop_halts_further_lines() {
    let store = applying_store();
    let sink = Arc::new(CaptureSink::default());
    let handle = spawn_reporter(Arc::clone(&store), 1, sink.clone());

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(sink.lines().len(), 1);

    handle.stop().await.unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(sink.lines().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn huge_interval_waits_instead_of_overflowing() {
    let store = applying_store();
    let handle = spawn_reporter(Arc::clone(&store), i64::MAX, Arc::new(TracingSink));
    assert!(handle.is_enabled());

    tokio::task::yield_now().await;
    sleep(Duration::from_secs(3_600)).await;

    handle.stop().await.unwrap();
}
