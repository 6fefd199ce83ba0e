use std::{collections::BTreeMap, path::Path};

use super::MonitorError;

pub type Metrics = BTreeMap<String, serde_json::Value>;

/// One day of gauge readings, keyed by station then metric name.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct RiverEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub stations: Option<BTreeMap<String, Metrics>>,
}

impl RiverEntry {
    pub fn stations(&self) -> impl Iterator<Item = (&String, &Metrics)> {
        self.stations.iter().flatten()
    }

    fn has_stations(&self) -> bool {
        self.stations.as_ref().is_some_and(|s| !s.is_empty())
    }
}

pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<RiverEntry>, MonitorError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| MonitorError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(serde_json::from_str(&raw)?)
}

/// Entries are newest first; the first one carrying station data wins.
pub fn latest_entry(entries: &[RiverEntry]) -> Option<&RiverEntry> {
    entries.iter().find(|entry| entry.has_stations())
}

/// Highest numeric reading among metrics whose name mentions `DISCHARGE`, or 0.
pub fn max_discharge(metrics: &Metrics) -> f64 {
    metrics
        .iter()
        .filter(|(name, _)| name.contains("DISCHARGE"))
        .filter_map(|(_, value)| value.as_f64())
        .fold(None, |max: Option<f64>, v| Some(max.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}
