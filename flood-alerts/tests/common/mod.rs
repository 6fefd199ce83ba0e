#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

pub const ANON_KEY: &str = "anon";

/// Binds an ephemeral loopback port, for apps that need their own URL
/// before they are served.
pub async fn listen() -> (tokio::net::TcpListener, String) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let address = listener.local_addr().expect("local address");
    (listener, format!("http://{address}"))
}

pub fn serve_on(listener: tokio::net::TcpListener, app: Router) {
    tokio::spawn(async move { axum::serve(listener, app).await });
}

/// Serves `app` on an ephemeral loopback port and returns its base URL.
pub async fn serve(app: Router) -> String {
    let (listener, base) = listen().await;
    serve_on(listener, app);
    base
}

/// Just enough PostgREST for the `users` table: unique phones, `eq.` filters.
#[derive(Clone, Default)]
pub struct FakePostgrest {
    pub rows: Arc<Mutex<Vec<Value>>>,
}

impl FakePostgrest {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/rest/v1/users", post(insert).get(select))
            .with_state(self.clone())
    }

    pub fn rows(&self) -> Vec<Value> {
        self.rows.lock().unwrap().clone()
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    header("apikey") == Some(ANON_KEY)
        && header("authorization") == Some(format!("Bearer {ANON_KEY}").as_str())
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "code": "PGRST301", "message": "No suitable key or wrong key type" })),
    )
        .into_response()
}

async fn insert(
    State(db): State<FakePostgrest>,
    headers: HeaderMap,
    Json(rows): Json<Vec<Value>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let mut stored = db.rows.lock().unwrap();
    for row in rows {
        if stored.iter().any(|r| r["phone"] == row["phone"]) {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "code": "23505",
                    "details": format!("Key (phone)=({}) already exists.", row["phone"]),
                    "hint": null,
                    "message": "duplicate key value violates unique constraint \"users_phone_key\""
                })),
            )
                .into_response();
        }
        stored.push(row);
    }

    StatusCode::CREATED.into_response()
}

async fn select(
    State(db): State<FakePostgrest>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let rows: Vec<Value> = db
        .rows
        .lock()
        .unwrap()
        .iter()
        .filter(|row| {
            query.iter().filter(|(k, _)| *k != "select").all(|(column, filter)| {
                filter
                    .strip_prefix("eq.")
                    .is_some_and(|value| row[column.as_str()] == value)
            })
        })
        .cloned()
        .collect();

    Json(rows).into_response()
}

/// A config endpoint that answers with a fixed status and body.
pub fn config_endpoint(status: StatusCode, body: Value) -> Router {
    Router::new().route(
        "/api/config",
        axum::routing::get(move || async move { (status, Json(body)) }),
    )
}

/// A config endpoint that answers 503 until `bring_up` is called.
#[derive(Clone)]
pub struct SwitchableConfig {
    up: Arc<AtomicBool>,
    body: Value,
}

impl SwitchableConfig {
    pub fn new(body: Value) -> Self {
        Self {
            up: Arc::new(AtomicBool::new(false)),
            body,
        }
    }

    pub fn bring_up(&self) {
        self.up.store(true, Ordering::SeqCst);
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/config", axum::routing::get(switchable_config))
            .with_state(self.clone())
    }
}

async fn switchable_config(State(config): State<SwitchableConfig>) -> Response {
    if config.up.load(Ordering::SeqCst) {
        Json(config.body).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response()
    }
}
