//! Integration tests for the tutorials client.
//!
//! Each test binds an in-memory implementation of the tutorials REST API and
//! drives it through the real `ApiClient` → `HttpTutorialService` → `TutorialStore` chain.

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::api::ApiClient;
use crate::commands::{self, Command};
use crate::errors::ClientError;
use crate::models::{CreateTutorialRequest, Tutorial, TutorialId, UpdateTutorialRequest};
use crate::service::{HttpTutorialService, TutorialService};
use crate::store::TutorialStore;
use crate::views::{Skin, MSG_CREATED, MSG_STATUS_UPDATED};

type FixtureResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Server-side state of the in-memory backend.
#[derive(Clone, Default)]
struct FixtureState {
    tutorials: Arc<Mutex<Vec<Tutorial>>>,
    next_id: Arc<AtomicI64>,
    failing: Arc<AtomicBool>,
    delay_ms: Arc<AtomicU64>,
    last_update: Arc<Mutex<Option<UpdateTutorialRequest>>>,
}

impl FixtureState {
    fn check(&self) -> Result<(), (StatusCode, Json<Value>)> {
        if self.failing.load(Ordering::SeqCst) {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Some error occurred" })),
            ));
        }
        Ok(())
    }

    fn not_found(id: &str) -> (StatusCode, Json<Value>) {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Cannot find Tutorial with id={}", id) })),
        )
    }
}

/// Path ids are compared by their text form, whatever the stored id type.
fn matches_path(tutorial: &Tutorial, id: &str) -> bool {
    tutorial.id.as_ref().is_some_and(|key| key.to_string() == id)
}

#[derive(Debug, Deserialize)]
struct TitleQuery {
    title: Option<String>,
}

async fn list_tutorials(
    State(state): State<FixtureState>,
    Query(query): Query<TitleQuery>,
) -> FixtureResult {
    let delay = state.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    state.check()?;

    let tutorials = state.tutorials.lock().unwrap();
    let matches: Vec<&Tutorial> = match &query.title {
        Some(title) => tutorials
            .iter()
            .filter(|t| t.title.contains(title.as_str()))
            .collect(),
        None => tutorials.iter().collect(),
    };
    Ok(Json(json!(matches)))
}

async fn create_tutorial(
    State(state): State<FixtureState>,
    Json(request): Json<CreateTutorialRequest>,
) -> FixtureResult {
    state.check()?;
    if request.title.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Content can not be empty!" })),
        ));
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let tutorial = Tutorial {
        id: Some(TutorialId::Number(id)),
        title: request.title,
        description: request.description,
        published: false,
    };
    state.tutorials.lock().unwrap().push(tutorial.clone());
    Ok(Json(json!(tutorial)))
}

async fn get_tutorial(State(state): State<FixtureState>, Path(id): Path<String>) -> FixtureResult {
    state.check()?;
    let tutorials = state.tutorials.lock().unwrap();
    match tutorials.iter().find(|t| matches_path(t, &id)) {
        Some(tutorial) => Ok(Json(json!(tutorial))),
        None => Err(FixtureState::not_found(&id)),
    }
}

async fn update_tutorial(
    State(state): State<FixtureState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTutorialRequest>,
) -> FixtureResult {
    state.check()?;
    *state.last_update.lock().unwrap() = Some(request.clone());
    let mut tutorials = state.tutorials.lock().unwrap();
    let tutorial = tutorials
        .iter_mut()
        .find(|t| matches_path(t, &id))
        .ok_or_else(|| FixtureState::not_found(&id))?;

    if let Some(title) = request.title {
        tutorial.title = title;
    }
    if let Some(description) = request.description {
        tutorial.description = description;
    }
    if let Some(published) = request.published {
        tutorial.published = published;
    }
    Ok(Json(json!(tutorial)))
}

async fn delete_tutorial(State(state): State<FixtureState>, Path(id): Path<String>) -> FixtureResult {
    state.check()?;
    let mut tutorials = state.tutorials.lock().unwrap();
    let index = tutorials
        .iter()
        .position(|t| matches_path(t, &id))
        .ok_or_else(|| FixtureState::not_found(&id))?;
    tutorials.remove(index);
    Ok(Json(
        json!({ "message": "Tutorial was deleted successfully!" }),
    ))
}

async fn delete_all_tutorials(State(state): State<FixtureState>) -> FixtureResult {
    state.check()?;
    let mut tutorials = state.tutorials.lock().unwrap();
    let count = tutorials.len();
    tutorials.clear();
    Ok(Json(
        json!({ "message": format!("{} Tutorials were deleted successfully!", count) }),
    ))
}

fn fixture_router(state: FixtureState) -> Router {
    let api_routes = Router::new()
        .route(
            "/tutorials",
            get(list_tutorials)
                .post(create_tutorial)
                .delete(delete_all_tutorials),
        )
        .route(
            "/tutorials/{id}",
            get(get_tutorial)
                .put(update_tutorial)
                .delete(delete_tutorial),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Test fixture for integration tests.
struct TestFixture {
    state: FixtureState,
    base_url: String,
}

impl TestFixture {
    async fn new() -> Self {
        let state = FixtureState::default();
        let app = fixture_router(state.clone());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        TestFixture {
            state,
            base_url: format!("http://{}/api", addr),
        }
    }

    fn service(&self) -> HttpTutorialService {
        HttpTutorialService::new(ApiClient::new(&self.base_url, None).unwrap())
    }

    fn store(&self) -> TutorialStore<HttpTutorialService> {
        TutorialStore::new(self.service())
    }

    fn seed(&self, titles: &[(&str, &str)]) {
        let mut tutorials = self.state.tutorials.lock().unwrap();
        for (title, description) in titles {
            let id = self.state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            tutorials.push(Tutorial {
                id: Some(TutorialId::Number(id)),
                title: title.to_string(),
                description: description.to_string(),
                published: false,
            });
        }
    }

    fn seed_with_id(&self, id: TutorialId, title: &str, description: &str) {
        self.state.tutorials.lock().unwrap().push(Tutorial {
            id: Some(id),
            title: title.to_string(),
            description: description.to_string(),
            published: false,
        });
    }

    fn server_tutorials(&self) -> Vec<Tutorial> {
        self.state.tutorials.lock().unwrap().clone()
    }

    fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn test_store_crud_round_trip() {
    let fixture = TestFixture::new().await;
    let store = fixture.store();

    // Create
    let first = store.create("Rust Basics", "ownership").await.unwrap();
    let second = store.create("Async Rust", "futures").await.unwrap();
    assert_eq!(first.id, Some(TutorialId::Number(1)));
    assert_eq!(second.id, Some(TutorialId::Number(2)));
    assert_eq!(store.snapshot(), vec![first.clone(), second.clone()]);

    // List
    let listed = store.list_all().await.unwrap();
    assert_eq!(listed, fixture.server_tutorials());

    // Update
    let id = TutorialId::Number(1);
    let updated = store
        .update(
            &id,
            &UpdateTutorialRequest {
                title: Some("Rust Basics 2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Rust Basics 2");
    assert_eq!(updated.description, "ownership");
    assert_eq!(store.snapshot()[1], second);

    // Publish
    let published = store
        .update(&id, &UpdateTutorialRequest::published(true))
        .await
        .unwrap();
    assert!(published.published);
    assert!(fixture.server_tutorials()[0].published);

    // Delete
    store.remove(&id).await.unwrap();
    assert_eq!(store.snapshot(), vec![second]);
    assert_eq!(fixture.server_tutorials().len(), 1);

    // Delete all, twice
    store.remove_all().await.unwrap();
    assert!(store.is_empty());
    store.remove_all().await.unwrap();
    assert!(store.is_empty());
    assert!(fixture.server_tutorials().is_empty());
}

#[tokio::test]
async fn test_search_by_title() {
    let fixture = TestFixture::new().await;
    fixture.seed(&[
        ("Rust & Tokio", "runtime"),
        ("Rust Basics", "ownership"),
        ("Go Basics", "goroutines"),
    ]);
    let store = fixture.store();
    store.list_all().await.unwrap();

    let found = store.search("Rust & T").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Rust & Tokio");
    assert_eq!(store.snapshot(), found);

    let found = store.search("Basics").await.unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_get_one() {
    let fixture = TestFixture::new().await;
    fixture.seed(&[("Rust Basics", "ownership")]);
    let service = fixture.service();

    let tutorial = service.get_one(&TutorialId::Number(1)).await.unwrap();
    assert_eq!(tutorial.title, "Rust Basics");

    let err = service.get_one(&TutorialId::Number(9)).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(ref id) if id == "9"));
}

#[tokio::test]
async fn test_server_failure_leaves_collection_unchanged() {
    let fixture = TestFixture::new().await;
    fixture.seed(&[("Rust Basics", "ownership"), ("Async Rust", "futures")]);
    let store = fixture.store();
    store.list_all().await.unwrap();
    let before = store.snapshot();
    let id = TutorialId::Number(1);

    fixture.set_failing(true);

    let err = store.create("Serde", "serialization").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(matches!(
        store.list_all().await.unwrap_err(),
        ClientError::Server { status: 500, .. }
    ));
    assert!(store
        .update(&id, &UpdateTutorialRequest::published(true))
        .await
        .is_err());
    assert!(store.remove(&id).await.is_err());
    assert!(store.remove_all().await.is_err());
    assert!(store.search("Rust").await.is_err());

    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_remove_missing_record_is_server_error() {
    let fixture = TestFixture::new().await;
    fixture.seed(&[("Rust Basics", "ownership")]);
    let store = fixture.store();
    store.list_all().await.unwrap();

    let err = store.remove(&TutorialId::Number(7)).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_stale_local_collection() {
    let fixture = TestFixture::new().await;
    fixture.seed(&[("Rust Basics", "ownership")]);
    let store = fixture.store();
    let id = TutorialId::Number(1);

    // The server accepts the update, but nothing was loaded locally.
    let err = store
        .update(&id, &UpdateTutorialRequest::published(true))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotInCollection(_)));
    assert!(fixture.server_tutorials()[0].published);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_network_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}/api", addr), None).unwrap();
    let store = TutorialStore::new(HttpTutorialService::new(client));

    let err = store.list_all().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_transport_timeout() {
    let fixture = TestFixture::new().await;
    fixture.seed(&[("Rust Basics", "ownership")]);
    fixture.state.delay_ms.store(500, Ordering::SeqCst);

    let client = ApiClient::new(&fixture.base_url, Some(Duration::from_millis(50))).unwrap();
    let store = TutorialStore::new(HttpTutorialService::new(client));

    match store.list_all().await.unwrap_err() {
        ClientError::Network(err) => assert!(err.is_timeout()),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_subscriber_sees_remote_changes() {
    let fixture = TestFixture::new().await;
    fixture.seed(&[("Rust Basics", "ownership")]);
    let store = fixture.store();
    let mut rx = store.subscribe();

    let task = tokio::spawn(async move {
        rx.changed().await.unwrap();
        rx.borrow_and_update().clone()
    });

    store.list_all().await.unwrap();
    let observed = task.await.unwrap();
    assert_eq!(observed, fixture.server_tutorials());
}

#[tokio::test]
async fn test_commands_drive_the_store() {
    let fixture = TestFixture::new().await;
    let store = fixture.store();
    let view = Skin::Plain.view();

    // Invalid draft renders the form and is rejected without a request.
    let output = commands::run(
        Command::Add {
            title: "Rust Basics".to_string(),
            description: String::new(),
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();
    assert!(!output.success);
    assert!(output.text.contains("description is required"));
    assert!(fixture.server_tutorials().is_empty());

    let output = commands::run(
        Command::Add {
            title: "Rust Basics".to_string(),
            description: "ownership".to_string(),
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();
    assert!(output.success);
    assert!(output.text.contains(MSG_CREATED));

    let output = commands::run(
        Command::Publish {
            id: "1".to_string(),
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();
    assert!(output.text.contains(MSG_STATUS_UPDATED));
    assert!(output.text.contains("Published"));

    let output = commands::run(Command::List { active: Some(0) }, &store, view.as_ref())
        .await
        .unwrap();
    assert!(output.text.contains("ownership"));

    let output = commands::run(
        Command::Show {
            id: "1".to_string(),
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();
    assert!(output.text.contains("Rust Basics"));

    let err = commands::run(
        Command::Update {
            id: "1".to_string(),
            title: None,
            description: None,
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    commands::run(
        Command::Delete {
            id: "1".to_string(),
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();
    assert!(store.is_empty());
    assert!(fixture.server_tutorials().is_empty());
}

#[tokio::test]
async fn test_delete_all_command_with_every_skin() {
    for skin in [Skin::Plain, Skin::Material, Skin::Bootstrap] {
        let fixture = TestFixture::new().await;
        fixture.seed(&[("Rust Basics", "ownership"), ("Async Rust", "futures")]);
        let store = fixture.store();
        let view = skin.view();

        let output = commands::run(Command::DeleteAll, &store, view.as_ref())
            .await
            .unwrap();

        assert!(output.success, "{skin}");
        assert!(store.is_empty(), "{skin}");
        assert!(fixture.server_tutorials().is_empty(), "{skin}");
    }
}

#[tokio::test]
async fn test_commands_keep_string_ids_from_the_server() {
    let fixture = TestFixture::new().await;
    fixture.seed_with_id(TutorialId::Text("5".to_string()), "Rust Basics", "ownership");
    fixture.seed_with_id(TutorialId::Text("6".to_string()), "Async Rust", "futures");
    let store = fixture.store();
    let view = Skin::Plain.view();

    let output = commands::run(
        Command::Publish {
            id: "5".to_string(),
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();
    assert!(output.success);
    assert!(output.text.contains("Published"));
    assert!(fixture.server_tutorials()[0].published);
    let held = store.find(&TutorialId::Text("5".to_string())).unwrap();
    assert!(held.published);

    let output = commands::run(
        Command::Update {
            id: "6".to_string(),
            title: Some("Async Rust 2".to_string()),
            description: None,
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();
    assert!(output.text.contains("Async Rust 2"));

    commands::run(
        Command::Delete {
            id: "5".to_string(),
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();
    let ids: Vec<_> = store.snapshot().into_iter().filter_map(|t| t.id).collect();
    assert_eq!(ids, vec![TutorialId::Text("6".to_string())]);
    assert_eq!(fixture.server_tutorials().len(), 1);
}

#[tokio::test]
async fn test_publish_sends_the_full_record() {
    let fixture = TestFixture::new().await;
    fixture.seed(&[("Rust Basics", "ownership")]);
    let store = fixture.store();
    let view = Skin::Plain.view();

    commands::run(
        Command::Unpublish {
            id: "1".to_string(),
        },
        &store,
        view.as_ref(),
    )
    .await
    .unwrap();

    let sent = fixture.state.last_update.lock().unwrap().clone();
    assert_eq!(
        sent,
        Some(UpdateTutorialRequest {
            title: Some("Rust Basics".to_string()),
            description: Some("ownership".to_string()),
            published: Some(false),
        })
    );
    assert!(!fixture.server_tutorials()[0].published);
}
