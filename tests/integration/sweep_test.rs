//! Integration tests for the nightly expiration sweep.

use chrono::Duration;

use freshtrack_entity::record::AUTO_RECORD_REASON;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_food_due_tomorrow_gets_one_record() {
    let app = TestApp::new();
    let user = app.create_test_user("alice", None, false);
    let food = app.add_food(&user, "Spinach", 1);

    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.records_generated, 1);

    let records = app.records_of(&user);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].return_date, food.expiration_date);
    assert_eq!(records[0].reason, AUTO_RECORD_REASON);
    assert_eq!(records[0].food_id, Some(food.id));
}

#[tokio::test]
async fn test_food_due_in_five_days_is_ignored() {
    let app = TestApp::new();
    let user = app.create_test_user("bob", Some("bob@example.com"), true);
    app.add_food(&user, "Rice", 5);

    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.records_generated, 0);
    assert_eq!(report.digests_sent, 0);
    assert!(app.records_of(&user).is_empty());
    assert!(app.transport.sent().is_empty());
}

#[tokio::test]
async fn test_food_due_in_three_days_is_digest_only() {
    let app = TestApp::new();
    let user = app.create_test_user("carol", Some("carol@example.com"), true);
    app.add_food(&user, "Yogurt", 3);

    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.records_generated, 0);
    assert!(app.records_of(&user).is_empty());

    let sent = app.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "carol@example.com");
    assert_eq!(sent[0].subject, "Expiring soon");
    assert!(sent[0].body.contains("Yogurt"));
    assert!(sent[0].body.contains("3 days remaining"));
}

#[tokio::test]
async fn test_digest_lists_every_expiring_item_once() {
    let app = TestApp::new();
    let user = app.create_test_user("dan", Some("dan@example.com"), true);
    app.add_food(&user, "Old bread", -2);
    app.add_food(&user, "Milk", 0);
    app.add_food(&user, "Ham", 2);
    app.add_food(&user, "Pasta", 30);

    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.records_generated, 3);
    assert_eq!(report.digests_sent, 1);

    let body = &app.transport.sent()[0].body;
    assert!(body.contains(">expired</span>"));
    assert!(body.contains(">0 days remaining</span>"));
    assert!(body.contains(">2 days remaining</span>"));
    assert!(!body.contains("Pasta"));

    let bread = body.find("Old bread").unwrap();
    let ham = body.find("Ham").unwrap();
    assert!(bread < ham);
}

#[tokio::test]
async fn test_sweeps_within_five_days_are_idempotent() {
    let app = TestApp::new();
    let user = app.create_test_user("erin", None, false);
    app.add_food(&user, "Cheese", 2);

    app.sweep.run().await.unwrap();
    for _ in 0..4 {
        app.clock.advance(Duration::days(1));
        let report = app.sweep.run().await.unwrap();
        assert_eq!(report.records_generated, 0);
        assert_eq!(report.duplicates_skipped, 1);
    }
    assert_eq!(app.records_of(&user).len(), 1);

    // Past the lookback the still-present food is recorded again.
    app.clock.advance(Duration::days(2));
    app.sweep.run().await.unwrap();
    assert_eq!(app.records_of(&user).len(), 2);
}

#[tokio::test]
async fn test_digest_failure_does_not_block_later_users() {
    let app = TestApp::new();
    let first = app.create_test_user("first", Some("first@example.com"), true);
    let second = app.create_test_user("second", Some("second@example.com"), true);
    app.add_food(&first, "Tofu", 1);
    app.add_food(&second, "Tofu", 1);
    app.transport.fail_for("first@example.com");

    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.users, 2);
    assert_eq!(report.digest_failures, 1);
    assert_eq!(report.digests_sent, 1);
    assert_eq!(app.records_of(&first).len(), 1);
    assert_eq!(app.records_of(&second).len(), 1);

    let sent = app.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "second@example.com");
}

#[tokio::test]
async fn test_users_without_opt_in_get_no_digest() {
    let app = TestApp::new();
    let opted_out = app.create_test_user("frank", Some("frank@example.com"), false);
    let no_address = app.create_test_user("gina", Some("   "), true);
    app.add_food(&opted_out, "Lettuce", 1);
    app.add_food(&no_address, "Lettuce", 1);

    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.records_generated, 2);
    assert_eq!(report.digests_sent, 0);
    assert!(app.transport.sent().is_empty());
}

#[tokio::test]
async fn test_record_failure_is_counted_and_sweep_continues() {
    let app = TestApp::new();
    let user = app.create_test_user("fay", Some("fay@example.com"), true);
    app.add_food(&user, "Bad", 0);
    app.add_food(&user, "Good", 1);
    app.faults.fail_records_for("Bad");

    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.foods, 2);
    assert_eq!(report.record_failures, 1);
    assert_eq!(report.records_generated, 1);
    assert_eq!(report.digests_sent, 1);

    let records = app.records_of(&user);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].food_name, "Good");

    let sent = app.transport.sent();
    assert!(sent[0].body.contains("Bad"));
    assert!(sent[0].body.contains("Good"));
}

#[tokio::test]
async fn test_failed_bulk_load_aborts_the_run() {
    let app = TestApp::new();
    let user = app.create_test_user("gus", Some("gus@example.com"), true);
    app.add_food(&user, "Ham", 0);
    app.faults.fail_bulk_load();

    let err = app.sweep.run().await.unwrap_err();
    assert_eq!(err.kind, freshtrack_core::error::ErrorKind::Database);
    assert!(app.records_of(&user).is_empty());
    assert!(app.transport.sent().is_empty());
}
