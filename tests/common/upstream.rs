//! Fake MusicBrainz web service
//!
//! Serves canned JSON under `/ws/2` and records every request it receives,
//! including the instant it arrived, so tests can check what the server sent
//! upstream and how the calls were spaced.

use super::constants::*;
use axum::{
    extract::{Query, State},
    http::{header::USER_AGENT, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub at: Instant,
    pub path: String,
    pub params: HashMap<String, String>,
    pub user_agent: Option<String>,
}

#[derive(Default)]
struct UpstreamState {
    requests: Mutex<Vec<RecordedRequest>>,
    failing: AtomicBool,
}

/// Running fake upstream. Shuts down when dropped.
pub struct FakeMusicBrainz {
    /// Base URL to configure the client with (e.g., "http://127.0.0.1:12345/ws/2")
    pub base_url: String,
    state: Arc<UpstreamState>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl FakeMusicBrainz {
    pub async fn spawn() -> Self {
        let state = Arc::new(UpstreamState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Fake upstream failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/ws/2", port),
            state,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Makes every subsequent request fail with 503.
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }
}

async fn handle(
    State(state): State<Arc<UpstreamState>>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        at: Instant::now(),
        path: path.clone(),
        params: params.clone(),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });

    if state.failing.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").into_response();
    }

    let resource = match path.strip_prefix("/ws/2/") {
        Some(resource) => resource,
        None => return not_found(),
    };
    match resource.split_once('/') {
        Some(("artist", "")) => search(params.get("query").map(String::as_str).unwrap_or("")),
        Some(("artist", mbid)) => artist(mbid),
        Some(("release", "")) => releases(params.get("artist").map(String::as_str)),
        Some(("release", id)) => release(id),
        _ => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not Found" }))).into_response()
}

fn beatles() -> Value {
    json!({
        "id": BEATLES_ID,
        "name": BEATLES_NAME,
        "type": "Group",
        "country": "GB",
        "life-span": { "begin": "1960", "end": "1970-04-10", "ended": true },
        "score": 100
    })
}

fn rock_artists() -> Vec<Value> {
    let mut artists: Vec<Value> = (1..ROCK_ARTIST_COUNT)
        .map(|i| {
            json!({
                "id": format!("00000000-0000-4000-8000-{:012}", i),
                "name": format!("Rock Artist {}", i),
                "score": 100 - i
            })
        })
        .collect();
    artists.insert(2, beatles());
    artists
}

fn search(query: &str) -> Response {
    let artists = match query.strip_prefix("tag:") {
        Some(MALFORMED_GENRE) => return Json(json!({ "count": 0 })).into_response(),
        Some(ROCK_GENRE) => rock_artists(),
        Some(_) => Vec::new(),
        None if query.to_lowercase().contains("beatles") => vec![
            beatles(),
            json!({ "id": TRIBUTE_BAND_ID, "name": "The Beatles Revival Band", "score": 71 }),
        ],
        None => Vec::new(),
    };
    Json(json!({
        "created": "2024-01-01T00:00:00.000Z",
        "count": artists.len(),
        "offset": 0,
        "artists": artists
    }))
    .into_response()
}

fn artist(mbid: &str) -> Response {
    if mbid != BEATLES_ID {
        return not_found();
    }
    let mut artist = beatles();
    artist["tags"] = json!([{ "name": "rock", "count": 30 }, { "name": "pop", "count": 20 }]);
    artist["aliases"] = json!([]);
    artist["rating"] = json!({ "value": 4.6, "votes-count": 120 });
    Json(artist).into_response()
}

fn releases(artist: Option<&str>) -> Response {
    let releases = if artist == Some(BEATLES_ID) {
        json!([
            { "id": RELEASE_ID, "title": "Abbey Road", "date": "1969-09-26", "status": "Official" },
            { "id": "r-2", "title": "abbey road ", "date": "1987", "status": "Official" },
            { "id": "r-3", "title": "Let It Be", "date": "1970-05-08", "status": "Official" }
        ])
    } else {
        json!([])
    };
    Json(json!({ "release-count": 3, "release-offset": 0, "releases": releases })).into_response()
}

fn release(id: &str) -> Response {
    if id != RELEASE_ID {
        return not_found();
    }
    Json(json!({
        "id": RELEASE_ID,
        "title": "Abbey Road",
        "media": [
            { "position": 1, "tracks": [
                { "number": "1", "recording": { "title": "Come Together", "length": 259_000 } },
                { "number": "2", "recording": { "title": "Something", "length": 182_000 } }
            ]},
            { "position": 2, "tracks": [
                { "number": "1", "recording": { "title": "Her Majesty", "length": 23_000 } }
            ]}
        ]
    }))
    .into_response()
}
