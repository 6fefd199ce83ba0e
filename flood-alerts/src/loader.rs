use std::sync::Arc;

use crate::{
    model::config::{Configuration, PublicConfig, PLACEHOLDER_KEY},
    supabase::{Inserter, SupabaseClient},
    AppError,
};

/// Outcome of loading the connection parameters.
#[derive(Clone)]
pub enum Initialization {
    Ready(Arc<dyn Inserter>),
    /// The form stays disabled, showing this notice, until a later page load
    /// gets a working configuration.
    Disabled(&'static str),
}

impl Initialization {
    pub fn inserter(&self) -> Option<&dyn Inserter> {
        match self {
            Initialization::Ready(client) => Some(client.as_ref()),
            Initialization::Disabled(_) => None,
        }
    }
}

impl std::fmt::Debug for Initialization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Initialization::Ready(_) => f.write_str("Ready"),
            Initialization::Disabled(notice) => f.debug_tuple("Disabled").field(notice).finish(),
        }
    }
}

/// What to do when the config endpoint can't be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackPolicy {
    RemoteOnly,
    Local { url: String, key: String },
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub endpoint: String,
    pub fallback: FallbackPolicy,
}

impl ConfigLoader {
    pub fn new(endpoint: impl Into<String>, fallback: FallbackPolicy) -> Self {
        Self {
            endpoint: endpoint.into(),
            fallback,
        }
    }

    /// Reads the endpoint once. Only the local fallback policy treats a
    /// non-success status as a failure by itself.
    pub async fn fetch(&self, http: &reqwest::Client) -> Result<Configuration, AppError> {
        let mut response = http.get(&self.endpoint).send().await?;
        if let FallbackPolicy::Local { .. } = self.fallback {
            response = response.error_for_status()?;
        }

        let payload: PublicConfig = response.json().await?;
        payload.into_configuration()
    }

    pub async fn initialize(&self, http: &reqwest::Client) -> Initialization {
        let configuration = match self.fetch(http).await {
            Ok(configuration) => configuration,
            Err(e) => {
                tracing::error!("Failed to initialize app from {}: {e}", self.endpoint);
                match self.fallback_configuration() {
                    Ok(configuration) => configuration,
                    Err(e) => {
                        e.log();
                        return Initialization::Disabled(e.user_msg());
                    }
                }
            }
        };

        connect(http, &configuration)
    }

    fn fallback_configuration(&self) -> Result<Configuration, AppError> {
        match &self.fallback {
            FallbackPolicy::RemoteOnly => Err(AppError::ConfigIncomplete(
                "no fallback configured for the config endpoint",
            )),
            FallbackPolicy::Local { key, .. } if key == PLACEHOLDER_KEY => {
                Err(AppError::FallbackUnconfigured)
            }
            FallbackPolicy::Local { url, key } => {
                tracing::warn!("Using local fallback Supabase configuration");
                Configuration::new(url.clone(), key.clone())
            }
        }
    }
}

pub fn connect(http: &reqwest::Client, configuration: &Configuration) -> Initialization {
    match SupabaseClient::new(http.clone(), configuration) {
        Ok(client) => {
            tracing::info!("Supabase initialized");
            Initialization::Ready(Arc::new(client))
        }
        Err(e) => {
            e.log();
            Initialization::Disabled(e.user_msg())
        }
    }
}
