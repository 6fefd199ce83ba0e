//! One pass of the flood monitor: read the latest gauge readings and text
//! every subscriber of a station whose discharge crosses the threshold.

use tracing::{error, info, warn};

use crate::supabase::SubscriberDirectory;

use self::{river::RiverEntry, sms::SmsGateway};

pub mod river;
pub mod sms;

/// Cusecs.
pub const DEFAULT_DISCHARGE_THRESHOLD: f64 = 100_000.0;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed river data: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn alert_message(station: &str, discharge: f64) -> String {
    format!(
        "ALERT: High water level detected at {station} ({discharge} cusecs). Please take necessary precautions."
    )
}

/// Returns how many texts went out.
pub async fn check_river_data(
    entries: &[RiverEntry],
    threshold: f64,
    directory: &dyn SubscriberDirectory,
    gateway: &dyn SmsGateway,
) -> usize {
    let Some(latest) = river::latest_entry(entries) else {
        warn!("No station data found.");
        return 0;
    };

    info!(
        "Checking data for date: {}",
        latest.date.as_deref().unwrap_or("unknown")
    );

    let mut alerts_sent = 0;
    for (station, metrics) in latest.stations() {
        let discharge = river::max_discharge(metrics);

        if discharge > threshold {
            warn!("HIGH DISCHARGE at {station}: {discharge} cusecs");
            alerts_sent += notify_subscribers(directory, gateway, station, discharge).await;
        } else {
            info!("{station}: {discharge} cusecs (Normal)");
        }
    }

    info!("Total alerts sent: {alerts_sent}");
    alerts_sent
}

pub async fn notify_subscribers(
    directory: &dyn SubscriberDirectory,
    gateway: &dyn SmsGateway,
    station: &str,
    discharge: f64,
) -> usize {
    let users = match directory.subscribers(station).await {
        Ok(users) => users,
        Err(e) => {
            error!("Error fetching users from Supabase: {e}");
            return 0;
        }
    };

    if users.is_empty() {
        info!("No users registered for {station}");
        return 0;
    }

    let message = alert_message(station, discharge);
    let mut sent = 0;
    for user in &users {
        match gateway.send(&user.phone, &message).await {
            Ok(()) => sent += 1,
            Err(e) => warn!("Failed to send SMS to {}: {e}", user.phone),
        }
    }

    info!("Sent {sent}/{} alerts for {station}", users.len());
    sent
}
