//! Minimal Supabase client speaking the PostgREST surface at `/rest/v1/`.

use reqwest::{Response, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    model::{config::Configuration, signup::Signup},
    AppError,
};

pub const USERS_TABLE: &str = "users";

/// A business-level failure reported by PostgREST, as opposed to a transport error.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct StructuredError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl StructuredError {
    pub const UNIQUE_VIOLATION: &'static str = "23505";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code == Self::UNIQUE_VIOLATION
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    #[error(transparent)]
    Structured(#[from] StructuredError),
    #[error("Transport: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for SupabaseError {
    fn from(value: reqwest::Error) -> Self {
        SupabaseError::Transport(Box::new(value))
    }
}

/// Adds one signup to the `users` table.
#[async_trait::async_trait]
pub trait Inserter: Send + Sync {
    async fn insert(&self, signup: &Signup) -> Result<(), SupabaseError>;
}

/// Looks up everyone registered for a station.
#[async_trait::async_trait]
pub trait SubscriberDirectory: Send + Sync {
    async fn subscribers(&self, station: &str) -> Result<Vec<Signup>, SupabaseError>;
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: Url,
    key: String,
}

impl SupabaseClient {
    pub fn new(http: reqwest::Client, config: &Configuration) -> Result<Self, AppError> {
        let invalid = |e: String| AppError::InvalidUrl(format!("{}: {e}", config.url()));

        let mut base = Url::parse(config.url()).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".into()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let rest_url = base
            .join("rest/v1/")
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            http,
            rest_url,
            key: config.key().to_string(),
        })
    }

    pub fn table_url(&self, table: &str) -> Result<Url, SupabaseError> {
        self.rest_url
            .join(table)
            .map_err(|e| SupabaseError::Transport(Box::new(e)))
    }

    pub async fn insert_into<T: Serialize + Sync>(
        &self,
        table: &str,
        rows: &[T],
    ) -> Result<(), SupabaseError> {
        let response = self
            .http
            .post(self.table_url(table)?)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        check(response).await.map(|_| ())
    }

    pub async fn select_eq<T: DeserializeOwned>(
        &self,
        table: &str,
        column: &str,
        value: &str,
    ) -> Result<Vec<T>, SupabaseError> {
        let response = self
            .http
            .get(self.table_url(table)?)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .query(&[("select", "*".to_string()), (column, format!("eq.{value}"))])
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }
}

async fn check(response: Response) -> Result<Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    let error = serde_json::from_str::<StructuredError>(&body)
        .ok()
        .filter(|e| !e.code.is_empty())
        .unwrap_or_else(|| StructuredError::new(status.as_str(), body));

    Err(error.into())
}

#[async_trait::async_trait]
impl Inserter for SupabaseClient {
    async fn insert(&self, signup: &Signup) -> Result<(), SupabaseError> {
        self.insert_into(USERS_TABLE, std::slice::from_ref(signup))
            .await
    }
}

#[async_trait::async_trait]
impl SubscriberDirectory for SupabaseClient {
    async fn subscribers(&self, station: &str) -> Result<Vec<Signup>, SupabaseError> {
        self.select_eq(USERS_TABLE, "station", station).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> Result<SupabaseClient, AppError> {
        SupabaseClient::new(
            reqwest::Client::new(),
            &Configuration::new(url, "anon").unwrap(),
        )
    }

    #[test]
    fn builds_rest_urls() {
        let client = client("https://abc.supabase.co").unwrap();

        assert_eq!(
            client.table_url(USERS_TABLE).unwrap().as_str(),
            "https://abc.supabase.co/rest/v1/users"
        );
    }

    #[test]
    fn keeps_path_prefix() {
        let client = client("http://localhost:54321/proxy").unwrap();

        assert_eq!(
            client.table_url(USERS_TABLE).unwrap().as_str(),
            "http://localhost:54321/proxy/rest/v1/users"
        );
    }

    #[test]
    fn rejects_unparseable_urls() {
        assert!(matches!(client("not a url"), Err(AppError::InvalidUrl(_))));
        assert!(matches!(
            client("mailto:ops@example.com"),
            Err(AppError::InvalidUrl(_))
        ));
    }

    #[test]
    fn parses_postgrest_error_body() {
        let error: StructuredError = serde_json::from_str(
            r#"{"code":"23505","details":"Key (phone)=(123) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"users_phone_key\""}"#,
        )
        .unwrap();

        assert!(error.is_unique_violation());
        assert_eq!(error.hint, None);
    }
}
