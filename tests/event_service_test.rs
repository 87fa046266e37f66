//! Event catalog behaviour against in-memory infrastructure.

mod common;

use campus_events::domain::{EventFilter, EventPatch};
use campus_events::errors::AppError;
use campus_events::services::ServiceContainer;
use chrono::{Duration, Utc};
use common::{draft, TestApp};
use uuid::Uuid;

#[tokio::test]
async fn test_empty_filter_matches_list_all() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let drama = app.admin("Carol", "Drama").await;
    app.event_in(&tech, "Hackathon", 4, "competition").await;
    app.event_in(&drama, "Hamlet", 2, "performance").await;
    let events = app.services.events();

    let all = events.list_all().await.unwrap();
    let filtered = events.list_filtered(EventFilter::default()).await.unwrap();
    let blank = events
        .list_filtered(EventFilter {
            club_name: Some("  ".to_string()),
            event_type: Some(String::new()),
        })
        .await
        .unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(all, filtered);
    assert_eq!(all, blank);
}

#[tokio::test]
async fn test_listing_is_chronological() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let today = Utc::now().date_naive();
    let events = app.services.events();

    events
        .create(&tech, draft("Evening", today + Duration::days(2), "19:00", "talk"))
        .await
        .unwrap();
    events
        .create(&tech, draft("Later Day", today + Duration::days(6), "08:00", "talk"))
        .await
        .unwrap();
    events
        .create(&tech, draft("Morning", today + Duration::days(2), "09:30", "talk"))
        .await
        .unwrap();

    let titles: Vec<String> = events
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["Morning", "Evening", "Later Day"]);
}

#[tokio::test]
async fn test_filters_are_conjunctive() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let drama = app.admin("Carol", "Drama").await;
    app.event_in(&tech, "Hackathon", 4, "competition").await;
    app.event_in(&tech, "Rust Talk", 5, "talk").await;
    app.event_in(&drama, "Improv Talk", 6, "talk").await;
    let events = app.services.events();

    let tech_talks = events
        .list_filtered(EventFilter {
            club_name: Some("Tech".to_string()),
            event_type: Some("talk".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(tech_talks.len(), 1);
    assert_eq!(tech_talks[0].title, "Rust Talk");

    let talks = events
        .list_filtered(EventFilter {
            club_name: None,
            event_type: Some("talk".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(talks.len(), 2);
}

#[tokio::test]
async fn test_students_cannot_create_events() {
    let app = TestApp::new();
    let bob = app.student("Bob").await;
    let date = Utc::now().date_naive() + Duration::days(3);

    let result = app
        .services
        .events()
        .create(&bob, draft("Party", date, "20:00", "social"))
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
}

#[tokio::test]
async fn test_invalid_date_is_validation_error() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let mut bad = draft("Hackathon", Utc::now().date_naive(), "18:00", "competition");
    bad.date = "next tuesday".to_string();

    let result = app.services.events().create(&tech, bad).await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_owner_updates_selected_fields() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let event = app.event_in(&tech, "Hackathon", 4, "competition").await;

    let updated = app
        .services
        .events()
        .update(
            &tech,
            event.id,
            EventPatch {
                location: Some("Library".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.location, "Library");
    assert_eq!(updated.title, event.title);
    assert_eq!(updated.date, event.date);
    assert_eq!(updated.created_by, tech.id);
}

#[tokio::test]
async fn test_other_admin_cannot_update() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let drama = app.admin("Carol", "Drama").await;
    let event = app.event_in(&tech, "Hackathon", 4, "competition").await;
    let events = app.services.events();

    let result = events
        .update(
            &drama,
            event.id,
            EventPatch {
                title: Some("Stolen".to_string()),
                ..Default::default()
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Forbidden)));
    assert_eq!(events.get(event.id).await.unwrap().title, "Hackathon");
}

#[tokio::test]
async fn test_empty_patch_is_rejected() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let event = app.event_in(&tech, "Hackathon", 4, "competition").await;

    let result = app
        .services
        .events()
        .update(&tech, event.id, EventPatch::default())
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_list_by_creator_only_returns_own_events() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let drama = app.admin("Carol", "Drama").await;
    app.event_in(&tech, "Hackathon", 4, "competition").await;
    app.event_in(&drama, "Hamlet", 2, "performance").await;

    let mine = app.services.events().list_by_creator(&tech).await.unwrap();

    assert_eq!(mine.len(), 1);
    assert!(mine.iter().all(|e| e.created_by == tech.id));
}

#[tokio::test]
async fn test_missing_event_is_not_found() {
    let app = TestApp::new();
    let tech = app.admin("Alice", "Tech").await;
    let events = app.services.events();

    assert!(matches!(events.get(Uuid::new_v4()).await, Err(AppError::NotFound)));
    assert!(matches!(
        events.delete(&tech, Uuid::new_v4()).await,
        Err(AppError::NotFound)
    ));
}
