//! Integration tests for the manual save path and its interplay with the sweep.

use chrono::Duration;

use freshtrack_entity::food::{CreateFood, FoodItem, UpdateFood};

use crate::helpers::TestApp;

fn create_input(app: &TestApp, name: &str, days: i64) -> CreateFood {
    CreateFood {
        name: name.to_string(),
        category: "Dairy".to_string(),
        quantity: 1,
        purchase_date: app.today() - Duration::days(3),
        expiration_date: app.today() + Duration::days(days),
        image: None,
        notes: None,
        tags: Vec::new(),
    }
}

fn update_input(food: &FoodItem) -> UpdateFood {
    UpdateFood {
        name: food.name.clone(),
        category: food.category.clone(),
        quantity: food.quantity,
        purchase_date: food.purchase_date,
        expiration_date: food.expiration_date,
        image: food.image.clone(),
        notes: food.notes.clone(),
        tags: food.tags.clone(),
    }
}

#[tokio::test]
async fn test_two_saves_within_an_hour_produce_one_record() {
    let app = TestApp::new();
    let user = app.create_test_user("alice", None, false);
    let ctx = app.ctx(&user);

    let food = app
        .foods
        .create_food(&ctx, create_input(&app, "Milk", 0))
        .await
        .unwrap();

    app.clock.advance(Duration::minutes(40));
    let mut edit = update_input(&food);
    edit.notes = Some("top shelf".to_string());
    app.foods.update_food(&ctx, food.id, edit).await.unwrap();

    assert_eq!(app.records_of(&user).len(), 1);
}

#[tokio::test]
async fn test_edit_syncs_existing_auto_record_instead_of_generating() {
    let app = TestApp::new();
    let user = app.create_test_user("bob", None, false);
    let ctx = app.ctx(&user);
    let food = app.add_food(&user, "Cream", 1);

    app.sweep.run().await.unwrap();
    assert_eq!(app.records_of(&user).len(), 1);

    let mut edit = update_input(&food);
    edit.name = "Sour cream".to_string();
    edit.quantity = 2;
    edit.expiration_date = app.today();
    app.foods.update_food(&ctx, food.id, edit).await.unwrap();

    let records = app.records_of(&user);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].food_name, "Sour cream");
    assert_eq!(records[0].quantity, 2);
    assert_eq!(records[0].return_date, app.today());
}

#[tokio::test]
async fn test_manual_save_then_sweep_does_not_duplicate() {
    let app = TestApp::new();
    let user = app.create_test_user("carol", None, false);
    let ctx = app.ctx(&user);

    app.foods
        .create_food(&ctx, create_input(&app, "Butter", 2))
        .await
        .unwrap();
    assert_eq!(app.records_of(&user).len(), 1);

    app.clock.advance(Duration::days(1));
    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.duplicates_skipped, 1);
    assert_eq!(app.records_of(&user).len(), 1);
}

#[tokio::test]
async fn test_changed_expiration_on_new_food_allows_second_record() {
    let app = TestApp::new();
    let user = app.create_test_user("dan", None, false);
    let ctx = app.ctx(&user);

    // Two separate foods with the same name but different dates. The second
    // one has no auto record of its own, so the manual policy runs and only
    // an exact return date match would suppress it.
    app.foods
        .create_food(&ctx, create_input(&app, "Eggs", 1))
        .await
        .unwrap();
    app.clock.advance(Duration::hours(1));
    app.foods
        .create_food(&ctx, create_input(&app, "Eggs", 2))
        .await
        .unwrap();

    assert_eq!(app.records_of(&user).len(), 2);
}

#[tokio::test]
async fn test_imported_foods_are_picked_up_by_the_sweep() {
    let app = TestApp::new();
    let user = app.create_test_user("erin", Some("erin@example.com"), true);
    let ctx = app.ctx(&user);

    let rows = vec![
        freshtrack_entity::food::ImportFood {
            name: Some("Kimchi".to_string()),
            expiration_date: Some(app.today() + Duration::days(1)),
            ..Default::default()
        },
        freshtrack_entity::food::ImportFood {
            name: None,
            expiration_date: Some(app.today()),
            ..Default::default()
        },
    ];
    assert_eq!(app.foods.batch_import_foods(&ctx, rows).await.unwrap(), 1);
    assert!(app.records_of(&user).is_empty());

    let report = app.sweep.run().await.unwrap();
    assert_eq!(report.records_generated, 1);
    assert_eq!(report.digests_sent, 1);
}

#[tokio::test]
async fn test_create_succeeds_when_record_generation_fails() {
    let app = TestApp::new();
    let user = app.create_test_user("hana", None, false);
    let ctx = app.ctx(&user);
    app.faults.fail_records_for("Tofu");

    let food = app
        .foods
        .create_food(&ctx, create_input(&app, "Tofu", 0))
        .await
        .unwrap();

    assert_eq!(food.name, "Tofu");
    assert!(app.records_of(&user).is_empty());
    let stored = app.foods.get_food(&ctx, food.id).await.unwrap();
    assert_eq!(stored.id, food.id);
}

#[tokio::test]
async fn test_update_succeeds_when_record_generation_fails() {
    let app = TestApp::new();
    let user = app.create_test_user("ivan", None, false);
    let ctx = app.ctx(&user);
    let food = app.add_food(&user, "Salmon", 10);
    app.faults.fail_records_for("Salmon");

    let mut edit = update_input(&food);
    edit.expiration_date = app.today();
    let updated = app.foods.update_food(&ctx, food.id, edit).await.unwrap();

    assert_eq!(updated.expiration_date, app.today());
    assert!(app.records_of(&user).is_empty());
}
