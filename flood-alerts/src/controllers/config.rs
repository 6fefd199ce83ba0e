use axum::{extract::State, http::Method, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::{model::config::PublicConfig, AppStateRef};

/// `GET /api/config`, open to any origin so a static page elsewhere can read it.
#[inline]
pub fn router() -> Router<AppStateRef> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/api/config", get(handler))
        .layer(cors)
}

pub async fn handler(State(state): State<AppStateRef>) -> Json<PublicConfig> {
    Json(state.public_config.clone())
}
