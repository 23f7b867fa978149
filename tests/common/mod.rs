#![allow(dead_code)]

use activity_roster::models::{ActivityRecord, Roster};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MockState {
    pub roster: Arc<Mutex<Roster>>,
    pub fetches: Arc<AtomicUsize>,
    pub fail_fetch: Arc<AtomicBool>,
}

impl MockState {
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub async fn participants(&self, activity: &str) -> Vec<String> {
        self.roster
            .lock()
            .await
            .get(activity)
            .map(|record| record.participants.clone())
            .unwrap_or_default()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: MockState,
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

pub fn chess_roster() -> Roster {
    let mut roster = Roster::new();
    roster.insert(
        "Chess Club".to_string(),
        ActivityRecord {
            description: "Learn strategies and compete in chess tournaments".into(),
            schedule: "Mon".into(),
            max_participants: 10,
            participants: vec!["a@x.com".into()],
        },
    );
    roster.insert(
        "Art Studio".to_string(),
        ActivityRecord {
            description: "Painting and drawing".into(),
            schedule: "Wed".into(),
            max_participants: 2,
            participants: Vec::new(),
        },
    );
    roster
}

/// Serves the activities API on an ephemeral port for the life of the test runtime.
pub async fn spawn_backend(roster: Roster) -> MockBackend {
    let state = MockState {
        roster: Arc::new(Mutex::new(roster)),
        ..MockState::default()
    };
    let app = Router::new()
        .route("/activities", get(list))
        .route("/activities/:name/signup", post(signup))
        .route("/activities/:name/unregister", post(unregister))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockBackend {
        base_url: format!("http://{addr}"),
        state,
    }
}

/// A url nothing listens on.
pub fn dead_backend_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

async fn list(State(state): State<MockState>) -> Result<Json<Roster>, (StatusCode, Json<Value>)> {
    state.fetches.fetch_add(1, Ordering::SeqCst);
    if state.fail_fetch.load(Ordering::SeqCst) {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "database offline" })),
        ));
    }
    Ok(Json(state.roster.lock().await.clone()))
}

async fn signup(
    State(state): State<MockState>,
    Path(name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> (StatusCode, Json<Value>) {
    let mut roster = state.roster.lock().await;
    let Some(record) = roster.get_mut(&name) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Activity not found" })));
    };
    if record.participants.contains(&query.email) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": "Already signed up" })));
    }
    record.participants.push(query.email);
    (StatusCode::OK, Json(json!({ "message": "Signed up" })))
}

async fn unregister(
    State(state): State<MockState>,
    Path(name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> (StatusCode, Json<Value>) {
    let mut roster = state.roster.lock().await;
    let Some(record) = roster.get_mut(&name) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "detail": "Activity not found" })));
    };
    let Some(index) = record.participants.iter().position(|p| *p == query.email) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Student is not signed up for this activity" })),
        );
    };
    let email = record.participants.remove(index);
    (StatusCode::OK, Json(json!({ "message": format!("Unregistered {email} from {name}") })))
}
