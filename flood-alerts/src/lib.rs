use {
    crate::controllers::signup,
    axum::{
        http::StatusCode,
        routing::{get, post},
        Router,
    },
    loader::{ConfigLoader, Initialization},
    model::page::msg,
    supabase::{StructuredError, SupabaseError},
    tokio::sync::RwLock,
    tracing_subscriber::EnvFilter,
};

pub mod loader;
pub mod monitor;
pub mod settings;
pub mod supabase;

pub mod controllers {
    pub mod config;
    pub mod signup;
}

pub mod model {
    pub mod config;
    pub mod page;
    pub mod signup;
}

pub mod view {
    pub mod signup;
}

pub type AppStateRef = &'static AppState;
pub struct AppState {
    pub requests: reqwest::Client,
    pub public_config: model::config::PublicConfig,
    pub loader: ConfigLoader,
    /// Last loader outcome; `None` until the first load finishes.
    pub client: RwLock<Option<Initialization>>,
}

impl AppState {
    pub fn new(public_config: model::config::PublicConfig, loader: ConfigLoader) -> Self {
        Self {
            requests: reqwest::Client::new(),
            public_config,
            loader,
            client: RwLock::new(None),
        }
    }

    /// Runs the loader and replaces whatever the slot held.
    pub async fn initialize(&self) -> Initialization {
        let initialization = self.loader.initialize(&self.requests).await;
        *self.client.write().await = Some(initialization.clone());
        initialization
    }

    pub async fn initialization(&self) -> Option<Initialization> {
        self.client.read().await.clone()
    }

    /// Keeps a ready client, otherwise loads again. Each page load gets its
    /// own attempt, so a config outage lasts until the next refresh.
    pub async fn ensure_initialized(&self) -> Initialization {
        match self.initialization().await {
            Some(ready @ Initialization::Ready(_)) => ready,
            _ => self.initialize().await,
        }
    }
}

pub fn router() -> Router<AppStateRef> {
    Router::new()
        .route("/", get(signup::signup_page))
        .route("/signup", post(signup::signup_form))
        .merge(controllers::config::router())
        .fallback(get((StatusCode::NOT_FOUND, "Could not find your route")))
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Config endpoint unavailable: {0}")]
    ConfigUnavailable(#[from] reqwest::Error),
    #[error("Config incomplete: {0}")]
    ConfigIncomplete(&'static str),
    #[error("Config incomplete: local fallback key is still the placeholder")]
    FallbackUnconfigured,
    #[error("Invalid Supabase URL: {0}")]
    InvalidUrl(String),
    #[error("Missing form field: {0}")]
    Validation(&'static str),
    #[error("Submit before client initialization")]
    UninitializedClient,
    #[error("Duplicate key: {0}")]
    Conflict(StructuredError),
    #[error("Supabase Error: {0}")]
    Insert(StructuredError),
    #[error("Unexpected Error: {0}")]
    Unexpected(Box<dyn std::error::Error + Send + Sync>),
}

impl AppError {
    /// The fixed text shown on the page. Error details only go to the log.
    pub fn user_msg(&self) -> &'static str {
        match self {
            AppError::ConfigUnavailable(_)
            | AppError::ConfigIncomplete(_)
            | AppError::InvalidUrl(_) => msg::CONFIG_ERROR,
            AppError::FallbackUnconfigured => msg::FALLBACK_UNCONFIGURED,
            AppError::Validation(_) => msg::MISSING_FIELDS,
            AppError::UninitializedClient => msg::NOT_INITIALIZED,
            AppError::Conflict(_) => msg::DUPLICATE_PHONE,
            AppError::Insert(_) => msg::SAVE_FAILED,
            AppError::Unexpected(_) => msg::UNEXPECTED,
        }
    }

    pub fn log(&self) {
        match self {
            AppError::Validation(_) => tracing::info!("{self}"),
            AppError::UninitializedClient | AppError::Conflict(_) => tracing::warn!("{self}"),
            _ => tracing::error!("{self}"),
        }
    }
}

impl From<SupabaseError> for AppError {
    fn from(value: SupabaseError) -> Self {
        match value {
            SupabaseError::Structured(error) if error.is_unique_violation() => {
                AppError::Conflict(error)
            }
            SupabaseError::Structured(error) => AppError::Insert(error),
            SupabaseError::Transport(error) => AppError::Unexpected(error),
        }
    }
}
