use std::{fmt::Display, str::FromStr};

use tracing::{info, warn};

use crate::{
    loader::{ConfigLoader, FallbackPolicy},
    model::config::{PublicConfig, PLACEHOLDER_KEY, PLACEHOLDER_URL},
    monitor::DEFAULT_DISCHARGE_THRESHOLD,
};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Settings for the signup server.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    /// Served as-is by `/api/config`.
    pub public_config: PublicConfig,
    pub loader: ConfigLoader,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let port: u16 = try_load(&lookup, "PORT", "8000")?;

        let public_config = PublicConfig::new(
            lookup("SUPABASE_URL").unwrap_or_default(),
            lookup("SUPABASE_ANON_KEY").unwrap_or_default(),
        );

        let endpoint = lookup("CONFIG_ENDPOINT")
            .unwrap_or_else(|| format!("http://127.0.0.1:{port}/api/config"));

        let fallback = match try_load::<String>(&lookup, "CONFIG_FALLBACK", "none")?.as_str() {
            "none" => FallbackPolicy::RemoteOnly,
            "local" => FallbackPolicy::Local {
                url: try_load(&lookup, "FALLBACK_SUPABASE_URL", PLACEHOLDER_URL)?,
                key: try_load(&lookup, "FALLBACK_SUPABASE_ANON_KEY", PLACEHOLDER_KEY)?,
            },
            other => {
                return Err(SettingsError::Invalid {
                    key: "CONFIG_FALLBACK",
                    value: other.to_string(),
                    reason: "expected \"none\" or \"local\"".into(),
                })
            }
        };

        Ok(Self {
            port,
            public_config,
            loader: ConfigLoader::new(endpoint, fallback),
        })
    }
}

/// Settings for the one-shot flood monitor.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub supabase_url: String,
    pub supabase_key: String,
    pub telerivet_api_key: String,
    pub telerivet_project_id: String,
    pub data_source_file: String,
    pub discharge_threshold: f64,
}

impl MonitorSettings {
    pub fn load() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        Ok(Self {
            supabase_url: lookup("SUPABASE_URL").unwrap_or_default(),
            supabase_key: lookup("SUPABASE_KEY").unwrap_or_default(),
            telerivet_api_key: lookup("TELERIVET_API_KEY").unwrap_or_default(),
            telerivet_project_id: lookup("TELERIVET_PROJECT_ID").unwrap_or_default(),
            data_source_file: try_load(&lookup, "DATA_SOURCE_FILE", "river_data.json")?,
            discharge_threshold: try_load(
                &lookup,
                "DISCHARGE_THRESHOLD",
                &DEFAULT_DISCHARGE_THRESHOLD.to_string(),
            )?,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, SettingsError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("Invalid {key} value: {e}");
            Err(SettingsError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}
