//! Integration tests against an in-process mock of the content API.


use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use serde_json::json;
use tempfile::TempDir;

use backend::{MockBackend, BOXERS, EVENTS, MATCHES, NEWS, POSTS};

use crate::api::Routes;
use crate::auth::StaticToken;
use crate::errors::{ApiError, DraftError, SubmitError};
use crate::manager::{LoadState, ResourceManager};
use crate::models::{Boxer, Event, Match, News, Post};
use crate::resource::{Attachment, FieldInput, FieldValue, Resource, Upload};
use crate::ProfileUpdate;

fn post_doc(id: &str, title: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "description": format!("About {}", title),
        "image": format!("/uploads/{}.jpg", id),
        "__v": 0
    })
}

fn png(name: &str) -> Upload {
    Upload::from_bytes(name, vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a])
}

fn ids<T: Resource>(manager: &ResourceManager<T>) -> Vec<String> {
    manager.items().iter().map(|i| i.id().to_string()).collect()
}

async fn loaded_posts(backend: &MockBackend, docs: &[(&str, &str)]) -> ResourceManager<Post> {
    backend.seed(
        &POSTS,
        docs.iter().map(|(id, title)| post_doc(id, title)).collect(),
    );
    let mut manager = ResourceManager::<Post>::new(backend.client());
    manager.load().await.unwrap();
    manager
}

// ============================================================================
// Load
// ============================================================================

#[tokio::test]
async fn test_load_replaces_list() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A"), ("b", "B"), ("c", "C")]).await;
    assert_eq!(ids(&manager), vec!["a", "b", "c"]);
    assert_eq!(manager.load_state(), &LoadState::Loaded);

    backend.seed(&POSTS, vec![post_doc("a", "A"), post_doc("c", "C2")]);
    manager.load().await.unwrap();

    assert_eq!(ids(&manager), vec!["a", "c"]);
    assert_eq!(manager.get("c").unwrap().title, "C2");
}

#[tokio::test]
async fn test_load_empty_collection() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<Match>::new(backend.client());
    let items = manager.load().await.unwrap();
    assert!(items.is_empty());
    assert_eq!(backend.last_request().path, "/matches");
}

#[tokio::test]
async fn test_load_failure_keeps_previous_list() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A"), ("b", "B")]).await;

    backend.fail_next(StatusCode::INTERNAL_SERVER_ERROR, "database offline");
    let err = manager.load().await.unwrap_err();

    assert_eq!(err.collection, "post");
    assert_eq!(err.source.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.to_string().contains("database offline"));
    assert_eq!(ids(&manager), vec!["a", "b"]);
    match manager.load_state() {
        LoadState::Failed(message) => assert!(!message.is_empty()),
        other => panic!("expected failed load state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_malformed_body() {
    let backend = MockBackend::start().await;
    let routes = Routes {
        list: "/health",
        ..Post::schema().routes
    };
    let mut manager = ResourceManager::<Post>::new(backend.client()).with_routes(routes);

    let err = manager.load().await.unwrap_err();
    assert!(matches!(err.source, ApiError::Malformed(_)));
    assert!(matches!(manager.load_state(), LoadState::Failed(_)));
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_appends_with_server_id() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;

    manager.begin_create();
    manager.update_draft_field("title", "Fight night").unwrap();
    manager.update_draft_field("description", "Card announced").unwrap();
    let first = manager.submit_create().await.unwrap();

    manager.begin_create();
    manager.update_draft_field("title", "Weigh-in").unwrap();
    manager.update_draft_field("description", "Friday").unwrap();
    let second = manager.submit_create().await.unwrap();

    assert!(!first.id.is_empty());
    assert_ne!(first.id, second.id);
    assert_eq!(ids(&manager), vec!["a".to_string(), first.id.clone(), second.id.clone()]);
    assert!(manager.draft().is_none());
    assert_eq!(backend.stored(&POSTS).len(), 3);
}

#[tokio::test]
async fn test_create_without_attachment_sends_no_file_part() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<Post>::new(backend.client());

    manager.begin_create();
    manager.update_draft_field("title", "Fight night").unwrap();
    manager.update_draft_field("description", "Card announced").unwrap();
    let created = manager.submit_create().await.unwrap();
    assert!(created.image.is_none());

    let request = backend.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/post");
    let parts = request.body.parts();
    let names: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["title", "description"]);
    assert!(parts.iter().all(|p| !p.is_file()));
}

#[tokio::test]
async fn test_create_with_attachment_sends_one_file_part() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<Post>::new(backend.client());

    manager.begin_create();
    manager.update_draft_field("title", "Fight night").unwrap();
    manager.update_draft_field("description", "Card announced").unwrap();
    manager.update_draft_field("image", png("first.png")).unwrap();
    manager.update_draft_field("image", png("poster.png")).unwrap();
    let created = manager.submit_create().await.unwrap();

    assert_eq!(created.image.as_deref(), Some("/uploads/poster.png"));

    let request = backend.last_request();
    let files: Vec<_> = request.body.parts().iter().filter(|p| p.is_file()).collect();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "image");
    assert_eq!(files[0].file_name.as_deref(), Some("poster.png"));
    assert_eq!(files[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(files[0].data, png("poster.png").bytes);
    let texts = request.body.parts().iter().filter(|p| !p.is_file()).count();
    assert_eq!(texts, 2);
}

#[tokio::test]
async fn test_create_from_file_on_disk() {
    let backend = MockBackend::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("final.mp4");
    tokio::fs::write(&path, b"not really a video").await.unwrap();

    let mut manager = ResourceManager::<Match>::new(backend.client());
    manager.begin_create();
    manager.update_draft_field("title", "Final").unwrap();
    manager.update_draft_field("description", "Round 12 stoppage").unwrap();
    manager
        .update_draft_field("video", Upload::from_path(&path).await.unwrap())
        .unwrap();
    let created = manager.submit_create().await.unwrap();

    assert_eq!(created.video.as_deref(), Some("/uploads/final.mp4"));
    let request = backend.last_request();
    assert_eq!(request.path, "/matches/create");
    let file = request.body.parts().iter().find(|p| p.is_file()).unwrap();
    assert_eq!(file.name, "video");
    assert_eq!(file.content_type.as_deref(), Some("video/mp4"));
}

#[tokio::test]
async fn test_validation_blocks_request() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<Post>::new(backend.client());

    manager.begin_create();
    manager.update_draft_field("title", "Only a title").unwrap();
    let err = manager.submit_create().await.unwrap_err();

    match &err {
        SubmitError::Validation { missing } => assert_eq!(missing, &vec!["description"]),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(!err.to_string().is_empty());
    assert!(backend.requests().is_empty());
    assert_eq!(
        manager.draft().unwrap().get("title"),
        Some(&FieldValue::Text("Only a title".to_string()))
    );
}

#[tokio::test]
async fn test_create_failure_preserves_draft() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;

    manager.begin_create();
    manager.update_draft_field("title", "Fight night").unwrap();
    manager.update_draft_field("description", "Card").unwrap();
    manager.update_draft_field("image", png("poster.png")).unwrap();
    let before = manager.draft().cloned();

    backend.fail_next(StatusCode::BAD_REQUEST, "Image too large");
    let err = manager.submit_create().await.unwrap_err();

    assert!(err.to_string().contains("Image too large"));
    assert_eq!(manager.draft().cloned(), before);
    assert_eq!(ids(&manager), vec!["a"]);
    assert_eq!(backend.stored(&POSTS).len(), 1);
}

#[tokio::test]
async fn test_submit_mode_mismatch() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;

    manager.begin_create();
    assert!(matches!(
        manager.submit_update().await,
        Err(SubmitError::WrongMode { expected: "update", .. })
    ));
    assert!(manager.draft().is_some());

    manager.begin_edit_by_id("a").unwrap();
    assert!(matches!(
        manager.submit_create().await,
        Err(SubmitError::WrongMode { expected: "create", .. })
    ));
    assert!(manager.draft().is_some());

    manager.cancel_edit();
    assert!(matches!(manager.submit_create().await, Err(SubmitError::NoDraft)));
    assert_eq!(backend.mutations().len(), 0);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_replaces_in_place() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A"), ("b", "B"), ("c", "C")]).await;
    let a = manager.get("a").cloned();
    let c = manager.get("c").cloned();

    manager.begin_edit_by_id("b").unwrap();
    manager.update_draft_field("title", "B2").unwrap();
    let updated = manager.submit_update().await.unwrap();

    assert_eq!(updated.title, "B2");
    assert_eq!(ids(&manager), vec!["a", "b", "c"]);
    assert_eq!(manager.items()[1], updated);
    assert_eq!(manager.get("a").cloned(), a);
    assert_eq!(manager.get("c").cloned(), c);
    assert!(manager.draft().is_none());

    let request = backend.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.path, "/post/b");
}

#[tokio::test]
async fn test_update_keeps_existing_attachment() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;

    manager.begin_edit_by_id("a").unwrap();
    manager.update_draft_field("description", "Rewritten").unwrap();
    let updated = manager.submit_update().await.unwrap();

    assert!(backend.last_request().body.parts().iter().all(|p| p.name != "image"));
    assert_eq!(updated.image.as_deref(), Some("/uploads/a.jpg"));
}

#[tokio::test]
async fn test_clear_attachment_sends_empty_text_part() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;

    manager.begin_edit_by_id("a").unwrap();
    manager.update_draft_field("image", FieldInput::Clear).unwrap();
    assert_eq!(manager.draft().unwrap().attachment(), &Attachment::Cleared);
    let updated = manager.submit_update().await.unwrap();

    let request = backend.last_request();
    let image_parts: Vec<_> = request
        .body
        .parts()
        .iter()
        .filter(|p| p.name == "image")
        .collect();
    assert_eq!(image_parts.len(), 1);
    assert!(!image_parts[0].is_file());
    assert!(image_parts[0].data.is_empty());
    assert!(updated.image.is_none());
    assert!(manager.get("a").unwrap().image.is_none());
}

#[tokio::test]
async fn test_draft_isolated_until_submit() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;
    let original = manager.get("a").cloned().unwrap();

    manager.begin_edit(&original);
    manager.update_draft_field("title", "Changed").unwrap();
    manager.update_draft_field("image", png("new.png")).unwrap();

    assert_eq!(manager.get("a"), Some(&original));
    manager.submit_update().await.unwrap();
    assert_eq!(manager.get("a").unwrap().title, "Changed");
    assert_eq!(manager.get("a").unwrap().image.as_deref(), Some("/uploads/new.png"));
}

#[tokio::test]
async fn test_update_failure_preserves_draft() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A"), ("b", "B")]).await;
    let before_items = manager.items().to_vec();

    manager.begin_edit_by_id("b").unwrap();
    manager.update_draft_field("title", "Rejected").unwrap();
    let draft = manager.draft().cloned();

    backend.fail_next(StatusCode::UNPROCESSABLE_ENTITY, "Title already used");
    let err = manager.submit_update().await.unwrap_err();

    match &err {
        SubmitError::Api(api) => {
            assert_eq!(api.status(), Some(StatusCode::UNPROCESSABLE_ENTITY))
        }
        other => panic!("expected API error, got {:?}", other),
    }
    assert!(err.to_string().contains("Title already used"));
    assert_eq!(manager.draft().cloned(), draft);
    assert_eq!(manager.items(), before_items.as_slice());
}

#[tokio::test]
async fn test_update_on_stale_list() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A"), ("b", "B")]).await;

    // Entry gone locally, still present on the server
    manager
        .delete(manager.request_delete("b").confirm())
        .await
        .unwrap();
    backend.seed(&POSTS, vec![post_doc("a", "A"), post_doc("b", "B")]);

    manager.begin_edit(&serde_json::from_value(post_doc("b", "B")).unwrap());
    manager.update_draft_field("title", "B3").unwrap();
    let err = manager.submit_update().await.unwrap_err();

    assert!(matches!(err, SubmitError::NotInList { ref id, .. } if id == "b"));
    assert_eq!(ids(&manager), vec!["a"]);
    assert!(manager.draft().is_none());
    let stored = backend.stored(&POSTS);
    assert_eq!(stored[1]["title"], "B3");
}

#[tokio::test]
async fn test_update_unknown_on_server() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;

    manager.begin_edit_by_id("a").unwrap();
    backend.seed(&POSTS, vec![]);
    let err = manager.submit_update().await.unwrap_err();

    assert!(matches!(&err, SubmitError::Api(api) if api.is_not_found()));
    assert!(manager.draft().is_some());
    assert_eq!(ids(&manager), vec!["a"]);
}

// ============================================================================
// Cancel & delete
// ============================================================================

#[tokio::test]
async fn test_cancel_is_local() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;
    let requests_before = backend.requests().len();

    manager.begin_edit_by_id("a").unwrap();
    manager.update_draft_field("title", "Never sent").unwrap();
    manager.cancel_edit();
    manager.cancel_edit();

    assert!(manager.draft().is_none());
    assert_eq!(manager.get("a").unwrap().title, "A");
    assert_eq!(backend.requests().len(), requests_before);
    assert_eq!(
        manager.update_draft_field("title", "x"),
        Err(DraftError::NoDraft)
    );
}

#[tokio::test]
async fn test_delete_removes_entry() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A"), ("b", "B")]).await;

    let pending = manager.request_delete("a");
    assert_eq!(pending.id(), "a");
    manager.delete(pending.confirm()).await.unwrap();

    assert_eq!(ids(&manager), vec!["b"]);
    assert_eq!(backend.stored(&POSTS).len(), 1);
    let request = backend.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.path, "/post/a");
}

#[tokio::test]
async fn test_delete_absent_is_success() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;

    // Server answers 404
    manager
        .delete(manager.request_delete("zzz").confirm())
        .await
        .unwrap();
    assert_eq!(ids(&manager), vec!["a"]);
}

#[tokio::test]
async fn test_delete_failure_keeps_entry() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A")]).await;

    backend.fail_next(StatusCode::FORBIDDEN, "Not allowed");
    let err = manager
        .delete(manager.request_delete("a").confirm())
        .await
        .unwrap_err();

    assert_eq!(err.id, "a");
    assert!(err.to_string().contains("Not allowed"));
    assert_eq!(ids(&manager), vec!["a"]);
}

#[tokio::test]
async fn test_delete_discards_matching_draft() {
    let backend = MockBackend::start().await;
    let mut manager = loaded_posts(&backend, &[("a", "A"), ("b", "B")]).await;

    manager.begin_edit_by_id("b").unwrap();
    manager
        .delete(manager.request_delete("a").confirm())
        .await
        .unwrap();
    assert_eq!(manager.draft().and_then(|d| d.id()), Some("b"));

    manager
        .delete(manager.request_delete("b").confirm())
        .await
        .unwrap();
    assert!(manager.draft().is_none());
}

// ============================================================================
// Per-type routes and encoding
// ============================================================================

#[tokio::test]
async fn test_match_routes() {
    let backend = MockBackend::start().await;
    backend.seed(
        &MATCHES,
        vec![json!({"_id": "m1", "title": "Semi", "description": "Split decision", "video": "/uploads/semi.mp4"})],
    );
    let mut manager = ResourceManager::<Match>::new(backend.client());
    manager.load().await.unwrap();

    manager.begin_edit_by_id("m1").unwrap();
    manager.update_draft_field("title", "Semi-final").unwrap();
    let updated = manager.submit_update().await.unwrap();
    assert_eq!(updated.title, "Semi-final");
    assert_eq!(updated.video.as_deref(), Some("/uploads/semi.mp4"));

    manager
        .delete(manager.request_delete("m1").confirm())
        .await
        .unwrap();

    let paths: Vec<(Method, String)> = backend
        .mutations()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        vec![
            (Method::PUT, "/matches/update/m1".to_string()),
            (Method::DELETE, "/matches/delete/m1".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_match_rejects_image_upload() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<Match>::new(backend.client());
    manager.begin_create();
    assert!(matches!(
        manager.update_draft_field("video", png("still.png")),
        Err(DraftError::InvalidValue { field: "video", .. })
    ));
}

#[tokio::test]
async fn test_news_date_field() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<News>::new(backend.client());

    manager.begin_create();
    manager.update_draft_field("title", "Team selected").unwrap();
    manager.update_draft_field("description", "Squad for the Games").unwrap();
    manager.update_draft_field("date", "2025-03-14").unwrap();
    let created = manager.submit_create().await.unwrap();

    assert_eq!(created.date, NaiveDate::from_ymd_opt(2025, 3, 14));
    let request = backend.last_request();
    assert_eq!(request.path, "/news");
    let date = request.body.parts().iter().find(|p| p.name == "date").unwrap();
    assert_eq!(date.text(), "2025-03-14");

    manager.begin_edit_by_id(&created.id).unwrap();
    manager.update_draft_field("title", "Team confirmed").unwrap();
    manager.submit_update().await.unwrap();
    assert_eq!(
        backend.last_request().path,
        format!("/news/update/{}", created.id)
    );
}

#[tokio::test]
async fn test_boxer_counts_and_social_links() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<Boxer>::new(backend.client());

    manager.begin_create();
    manager.update_draft_field("name", "Ana Uwase").unwrap();
    manager.update_draft_field("description", "Southpaw").unwrap();
    manager.update_draft_field("winningMatches", "12").unwrap();
    manager
        .update_draft_field("instagram", "https://instagram.com/ana")
        .unwrap();
    let created = manager.submit_create().await.unwrap();

    let request = backend.last_request();
    let part = |name: &str| {
        request
            .body
            .parts()
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.text())
    };
    assert_eq!(part("winningMatches").as_deref(), Some("12"));
    assert_eq!(part("lostMatches").as_deref(), Some("0"));
    assert_eq!(part("draw").as_deref(), Some("0"));
    assert_eq!(part("twitter").as_deref(), Some(""));

    assert_eq!(created.winning_matches, 12);
    assert_eq!(created.lost_matches, 0);
    assert_eq!(created.social_media.instagram, "https://instagram.com/ana");

    manager
        .delete(manager.request_delete(created.id.clone()).confirm())
        .await
        .unwrap();
    assert_eq!(backend.last_request().path, format!("/boxers/{}", created.id));
}

#[tokio::test]
async fn test_boxer_photo_update() {
    let backend = MockBackend::start().await;
    backend.seed(
        &BOXERS,
        vec![json!({
            "_id": "b1",
            "name": "Ana",
            "description": "Southpaw",
            "winningMatches": "10",
            "lostMatches": 2,
            "draw": null,
            "socialMedia": {"instagram": "https://instagram.com/ana"}
        })],
    );
    let mut manager = ResourceManager::<Boxer>::new(backend.client());
    manager.load().await.unwrap();
    assert_eq!(manager.get("b1").unwrap().winning_matches, 10);

    manager.begin_edit_by_id("b1").unwrap();
    assert_eq!(
        manager.draft().unwrap().get("instagram"),
        Some(&FieldValue::Text("https://instagram.com/ana".to_string()))
    );
    manager
        .update_draft_field("photo", Upload::from_bytes("ana.jpg", vec![0xff, 0xd8]))
        .unwrap();
    let updated = manager.submit_update().await.unwrap();

    assert_eq!(updated.photo.as_deref(), Some("/uploads/ana.jpg"));
    assert_eq!(updated.social_media.instagram, "https://instagram.com/ana");
    assert_eq!(backend.last_request().path, "/boxers/update/b1");
    assert_eq!(
        manager
            .client()
            .resolve_asset(updated.photo.as_deref().unwrap())
            .unwrap(),
        backend.base_url.join("uploads/ana.jpg").unwrap()
    );
}

#[tokio::test]
async fn test_event_sent_as_json() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<Event>::new(backend.client());

    manager.begin_create();
    manager.update_draft_field("title", "National championship").unwrap();
    manager.update_draft_field("location", "Kigali").unwrap();
    manager.update_draft_field("date", "2025-11-02").unwrap();
    manager.update_draft_field("description", "Finals").unwrap();
    let created = manager.submit_create().await.unwrap();

    assert_eq!(created.location, "Kigali");
    assert_eq!(created.date, NaiveDate::from_ymd_opt(2025, 11, 2));
    let request = backend.last_request();
    assert_eq!(request.path, "/events");
    assert_eq!(
        request.body,
        backend::RecordedBody::Json(json!({
            "title": "National championship",
            "location": "Kigali",
            "date": "2025-11-02",
            "description": "Finals"
        }))
    );

    manager.begin_edit_by_id(&created.id).unwrap();
    manager.update_draft_field("location", "Huye").unwrap();
    let updated = manager.submit_update().await.unwrap();
    assert_eq!(updated.location, "Huye");
    assert_eq!(backend.last_request().path, format!("/events/{}", created.id));
    assert_eq!(backend.stored(&EVENTS)[0]["location"], "Huye");
}

#[tokio::test]
async fn test_event_has_no_attachment() {
    let backend = MockBackend::start().await;
    let mut manager = ResourceManager::<Event>::new(backend.client());
    manager.begin_create();
    assert_eq!(
        manager.update_draft_field("image", png("a.png")),
        Err(DraftError::UnknownField("image".to_string()))
    );
}

#[tokio::test]
async fn test_id_is_one_path_segment() {
    let backend = MockBackend::start().await;
    backend.seed(&NEWS, vec![]);
    let mut manager = ResourceManager::<News>::new(backend.client());

    manager
        .delete(manager.request_delete("a/b c").confirm())
        .await
        .unwrap();
    assert_eq!(backend.last_request().path, "/news/delete/a%2Fb%20c");
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_bearer_token_sent() {
    let backend = MockBackend::start().await;
    backend.require_token("secret-token");
    backend.seed(&POSTS, vec![post_doc("a", "A")]);

    let client = backend.client_with(Arc::new(StaticToken::new("secret-token")));
    let mut manager = ResourceManager::<Post>::new(client);
    manager.load().await.unwrap();

    assert_eq!(
        backend.last_request().authorization.as_deref(),
        Some("Bearer secret-token")
    );
}

#[tokio::test]
async fn test_unauthorized() {
    let backend = MockBackend::start().await;
    backend.require_token("secret-token");

    let mut manager = ResourceManager::<Post>::new(backend.client());
    let err = manager.load().await.unwrap_err();
    assert_eq!(err.source.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(backend.last_request().authorization.is_none());

    let client = backend.client_with(Arc::new(StaticToken::new("wrong")));
    let mut manager = ResourceManager::<Post>::new(client);
    manager.begin_create();
    manager.update_draft_field("title", "T").unwrap();
    manager.update_draft_field("description", "D").unwrap();
    assert!(matches!(
        manager.submit_create().await,
        Err(SubmitError::Api(ApiError::Status { .. }))
    ));
    assert!(manager.draft().is_some());
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_profile_fetch_and_update() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let profile = client.fetch_profile().await.unwrap();
    assert_eq!(profile.email, "admin@rbf.rw");

    let updated = client
        .update_profile(&ProfileUpdate::new("new@rbf.rw", None))
        .await
        .unwrap();
    assert_eq!(updated.email, "new@rbf.rw");

    let request = backend.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(
        request.body,
        backend::RecordedBody::Json(json!({ "email": "new@rbf.rw" }))
    );
    assert_eq!(client.fetch_profile().await.unwrap().email, "new@rbf.rw");
}

#[tokio::test]
async fn test_profile_requires_email() {
    let backend = MockBackend::start().await;
    let err = backend
        .client()
        .update_profile(&ProfileUpdate::new("  ", Some("pw".into())))
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Validation { .. }));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_profile_fetch_failure() {
    let backend = MockBackend::start().await;
    backend.fail_next(StatusCode::SERVICE_UNAVAILABLE, "try later");
    let err = backend.client().fetch_profile().await.unwrap_err();
    assert_eq!(err.source.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}
