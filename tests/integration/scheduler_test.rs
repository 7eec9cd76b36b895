//! Integration tests for the scheduler lifecycle.

use freshtrack_worker::ExpirationScheduler;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_run_now_executes_a_sweep() {
    let app = TestApp::new();
    let user = app.create_test_user("alice", Some("alice@example.com"), true);
    app.add_food(&user, "Berries", 1);

    let scheduler = ExpirationScheduler::with_cron(app.sweep.clone(), "0 0 9 * * *")
        .await
        .unwrap();

    let report = scheduler.run_now().await.unwrap().unwrap();
    assert_eq!(report.records_generated, 1);
    assert_eq!(report.digests_sent, 1);

    let report = scheduler.run_now().await.unwrap().unwrap();
    assert_eq!(report.records_generated, 0);
    assert_eq!(app.records_of(&user).len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_scheduler_starts_and_stops() {
    let app = TestApp::new();
    let scheduler = ExpirationScheduler::with_cron(app.sweep.clone(), "0 0 9 * * *")
        .await
        .unwrap();

    scheduler.start().await.unwrap();
    assert!(!scheduler.is_running());
    scheduler.stop().await.unwrap();
}
