use flood_alerts::{settings::Settings, AppState, AppStateRef};

#[cfg(feature = "shuttle")]
#[shuttle_runtime::main]
pub async fn shuttle(
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    let settings =
        Settings::from_lookup(|key| secrets.get(key)).expect("Secrets misconfigured!");

    let state: AppStateRef = Box::leak(Box::new(AppState::new(
        settings.public_config,
        settings.loader,
    )));

    // CONFIG_ENDPOINT has to name the deployed URL here, the default loopback
    // address is not served until shuttle starts the router.
    tokio::spawn(async move { state.initialize().await });

    let app = flood_alerts::router()
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state);

    Ok(shuttle_axum::AxumService(app))
}

#[cfg(not(feature = "shuttle"))]
#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    flood_alerts::init_tracing();

    let settings = Settings::load().expect("Environment misconfigured!");

    let state: AppStateRef = Box::leak(Box::new(AppState::new(
        settings.public_config,
        settings.loader,
    )));

    let app = flood_alerts::router()
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state);

    let address = format!("0.0.0.0:{}", settings.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to address {address}: {e}"));
    tracing::info!("Starting server at http://localhost:{}", settings.port);

    // The default endpoint is this server, so load only once it is listening.
    tokio::spawn(async move { state.initialize().await });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

#[cfg(not(feature = "shuttle"))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down");
}
