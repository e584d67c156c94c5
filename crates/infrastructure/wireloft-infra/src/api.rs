use serde::{Deserialize, Serialize};
use wireloft_core::{CreateShowRequest, MediaProfile, Show, UpdateShowConfig};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("invalid API url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("HTTP {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("{what} not found")]
    NotFound { what: String },
    #[error("unexpected response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Text shown in place of data when a fetch fails.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { status, .. } => format!("HTTP {status}"),
            ApiError::NotFound { what } => format!("{what} not found."),
            ApiError::Cancelled => "Request cancelled".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// The WireLoft REST API as consumed by this client.
#[async_trait::async_trait]
pub trait WireloftApi: Send + Sync + 'static {
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError>;
    async fn get_show(&self, id: &str) -> Result<Show, ApiError>;
    async fn update_show_config(&self, id: &str, body: &UpdateShowConfig)
        -> Result<(), ApiError>;
    async fn list_media_profiles(&self) -> Result<Vec<MediaProfile>, ApiError>;
    async fn create_show(&self, request: &CreateShowRequest) -> Result<(), ApiError>;
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}
