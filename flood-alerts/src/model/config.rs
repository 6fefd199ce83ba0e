use crate::AppError;

pub const PLACEHOLDER_URL: &str = "YOUR_SUPABASE_URL";
pub const PLACEHOLDER_KEY: &str = "YOUR_SUPABASE_ANON_KEY";

/// Body of `GET /api/config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublicConfig {
    #[serde(rename = "SUPABASE_URL", default)]
    pub supabase_url: Option<String>,
    #[serde(rename = "SUPABASE_ANON_KEY", default)]
    pub supabase_anon_key: Option<String>,
}

impl PublicConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            supabase_url: Some(url.into()),
            supabase_anon_key: Some(key.into()),
        }
    }

    pub fn into_configuration(self) -> Result<Configuration, AppError> {
        let url = self
            .supabase_url
            .filter(|url| !url.is_empty())
            .ok_or(AppError::ConfigIncomplete("SUPABASE_URL is missing"))?;
        let key = self
            .supabase_anon_key
            .filter(|key| !key.is_empty())
            .ok_or(AppError::ConfigIncomplete("SUPABASE_ANON_KEY is missing"))?;

        Configuration::new(url, key)
    }
}

/// Connection parameters that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    url: String,
    key: String,
}

impl Configuration {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Result<Self, AppError> {
        let (url, key) = (url.into(), key.into());

        if url.is_empty() {
            return Err(AppError::ConfigIncomplete("SUPABASE_URL is missing"));
        }
        if key.is_empty() {
            return Err(AppError::ConfigIncomplete("SUPABASE_ANON_KEY is missing"));
        }
        if url == PLACEHOLDER_URL {
            return Err(AppError::ConfigIncomplete("SUPABASE_URL is a placeholder"));
        }
        if key == PLACEHOLDER_KEY {
            return Err(AppError::ConfigIncomplete(
                "SUPABASE_ANON_KEY is a placeholder",
            ));
        }

        Ok(Self { url, key })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
