use reqwest::StatusCode;

pub const TELERIVET_API: &str = "https://api.telerivet.com";

#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    #[error("Missing Telerivet Credentials")]
    MissingCredentials,
    #[error("Telerivet answered {0}")]
    Rejected(StatusCode),
    #[error("Telerivet request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait::async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, to_number: &str, content: &str) -> Result<(), SmsError>;
}

#[derive(Debug, Clone)]
pub struct Telerivet {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    project_id: String,
}

impl Telerivet {
    pub fn new(http: reqwest::Client, api_key: String, project_id: String) -> Self {
        Self::with_base_url(http, TELERIVET_API, api_key, project_id)
    }

    pub fn with_base_url(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: String,
        project_id: String,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
            project_id,
        }
    }
}

#[async_trait::async_trait]
impl SmsGateway for Telerivet {
    async fn send(&self, to_number: &str, content: &str) -> Result<(), SmsError> {
        if self.api_key.is_empty() || self.project_id.is_empty() {
            return Err(SmsError::MissingCredentials);
        }

        let url = format!(
            "{}/v1/projects/{}/messages/send",
            self.base_url.trim_end_matches('/'),
            self.project_id
        );
        let response = self
            .http
            .post(url)
            .basic_auth(&self.api_key, Some(""))
            .form(&[("to_number", to_number), ("content", content)])
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Sent SMS to {to_number}: Status {status}");

        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(SmsError::Rejected(status))
        }
    }
}
