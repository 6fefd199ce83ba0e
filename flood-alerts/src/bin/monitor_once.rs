use std::process::ExitCode;

use flood_alerts::{
    model::config::Configuration,
    monitor::{self, river, sms::Telerivet},
    settings::MonitorSettings,
    supabase::SupabaseClient,
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    flood_alerts::init_tracing();

    let settings = match MonitorSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Flood monitoring system, single run");

    let http = reqwest::Client::new();

    let supabase = match Configuration::new(&settings.supabase_url, &settings.supabase_key)
        .and_then(|config| SupabaseClient::new(http.clone(), &config))
    {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Cannot proceed without Supabase connection: {e}");
            return ExitCode::FAILURE;
        }
    };

    let entries = match river::load_entries(&settings.data_source_file) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Error checking river data: {e}");
            return ExitCode::FAILURE;
        }
    };

    let gateway = Telerivet::new(
        http,
        settings.telerivet_api_key,
        settings.telerivet_project_id,
    );

    monitor::check_river_data(
        &entries,
        settings.discharge_threshold,
        &supabase,
        &gateway,
    )
    .await;

    tracing::info!("Monitoring complete");
    ExitCode::SUCCESS
}
