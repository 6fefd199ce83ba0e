mod common;

use axum::http::StatusCode;
use flood_alerts::{
    loader::{ConfigLoader, FallbackPolicy, Initialization},
    model::{
        config::{PLACEHOLDER_KEY, PLACEHOLDER_URL},
        page::msg,
    },
};
use serde_json::json;

async fn endpoint(status: StatusCode, body: serde_json::Value) -> String {
    let base = common::serve(common::config_endpoint(status, body)).await;
    format!("{base}/api/config")
}

fn local(url: &str, key: &str) -> FallbackPolicy {
    FallbackPolicy::Local {
        url: url.into(),
        key: key.into(),
    }
}

#[tokio::test]
async fn remote_config_connects() {
    let endpoint = endpoint(
        StatusCode::OK,
        json!({ "SUPABASE_URL": "https://abc.supabase.co", "SUPABASE_ANON_KEY": "anon" }),
    )
    .await;

    let loader = ConfigLoader::new(endpoint, FallbackPolicy::RemoteOnly);
    let init = loader.initialize(&reqwest::Client::new()).await;

    assert!(matches!(init, Initialization::Ready(_)));
}

#[tokio::test]
async fn remote_only_missing_fields_disable_the_form() {
    let endpoint = endpoint(
        StatusCode::OK,
        json!({ "SUPABASE_URL": "https://abc.supabase.co", "SUPABASE_ANON_KEY": "" }),
    )
    .await;

    let loader = ConfigLoader::new(endpoint, FallbackPolicy::RemoteOnly);
    let init = loader.initialize(&reqwest::Client::new()).await;

    assert!(matches!(init, Initialization::Disabled(msg::CONFIG_ERROR)));
}

#[tokio::test]
async fn remote_only_reads_the_body_whatever_the_status() {
    let endpoint = endpoint(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "SUPABASE_URL": "https://abc.supabase.co", "SUPABASE_ANON_KEY": "anon" }),
    )
    .await;

    let loader = ConfigLoader::new(endpoint, FallbackPolicy::RemoteOnly);
    let init = loader.initialize(&reqwest::Client::new()).await;

    assert!(matches!(init, Initialization::Ready(_)));
}

#[tokio::test]
async fn server_error_with_placeholder_fallback_disables_with_warning() {
    let endpoint = endpoint(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "SUPABASE_URL": "https://abc.supabase.co", "SUPABASE_ANON_KEY": "anon" }),
    )
    .await;

    let loader = ConfigLoader::new(endpoint, local(PLACEHOLDER_URL, PLACEHOLDER_KEY));
    let fetched = loader.fetch(&reqwest::Client::new()).await;
    let init = loader.initialize(&reqwest::Client::new()).await;

    assert!(fetched.is_err());
    assert!(matches!(
        init,
        Initialization::Disabled(msg::FALLBACK_UNCONFIGURED)
    ));
}

#[tokio::test]
async fn server_error_with_configured_fallback_connects() {
    let endpoint = endpoint(StatusCode::SERVICE_UNAVAILABLE, json!({})).await;

    let loader = ConfigLoader::new(endpoint, local("https://abc.supabase.co", "anon"));
    let init = loader.initialize(&reqwest::Client::new()).await;

    assert!(matches!(init, Initialization::Ready(_)));
}

#[tokio::test]
async fn incomplete_remote_config_uses_fallback() {
    let endpoint = endpoint(StatusCode::OK, json!({ "SUPABASE_URL": "https://abc.supabase.co" })).await;

    let loader = ConfigLoader::new(endpoint, local("https://xyz.supabase.co", "anon"));
    let init = loader.initialize(&reqwest::Client::new()).await;

    assert!(matches!(init, Initialization::Ready(_)));
}
