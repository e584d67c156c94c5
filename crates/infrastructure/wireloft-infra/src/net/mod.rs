use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use wireloft_core::{CreateShowRequest, MediaProfile, Show, UpdateShowConfig};

use crate::api::{ApiError, HealthStatus, WireloftApi};

pub fn default_http_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(wireloft_config::REQUEST_TIMEOUT)
        .user_agent(concat!("wireloft/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Normalize an API base URL so endpoint paths are appended below it.
pub(crate) fn normalize_api_base(base: &str) -> Result<Url, ApiError> {
    let invalid = |message: String| ApiError::InvalidUrl {
        url: base.to_string(),
        message,
    };
    let mut url = Url::parse(base.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("not a hierarchical url".into()));
    }

    // Treat the input as a *directory base* even when the caller provided
    // something like `http://host/api` without a trailing slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// HTTP implementation of [`WireloftApi`]. Every body is decoded into typed entities.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    client: Client,
    base: Url,
}

impl HttpApiClient {
    pub fn new(client: Client, base: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client,
            base: normalize_api_base(base)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        {
            let mut segs = url.path_segments_mut().map_err(|_| ApiError::InvalidUrl {
                url: self.base.to_string(),
                message: "cannot mutate url segments".into(),
            })?;
            segs.pop_if_empty();
            segs.extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        not_found: Option<&str>,
    ) -> Result<T, ApiError> {
        let endpoint = url.path().to_string();
        debug!("GET {url}");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport(&endpoint, e))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(what) = not_found {
                return Err(ApiError::NotFound {
                    what: what.to_string(),
                });
            }
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| transport(&endpoint, e))?;
        decode(&endpoint, &bytes)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        not_found: Option<&str>,
    ) -> Result<(), ApiError> {
        let endpoint = url.path().to_string();
        debug!("{method} {url}");
        let resp = self
            .client
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport(&endpoint, e))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(what) = not_found {
                return Err(ApiError::NotFound {
                    what: what.to_string(),
                });
            }
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

fn transport(endpoint: &str, e: reqwest::Error) -> ApiError {
    ApiError::Transport {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

fn require_ids<'a>(
    endpoint: &str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), ApiError> {
    if ids.into_iter().any(|id| id.trim().is_empty()) {
        return Err(ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: "entity with empty id".into(),
        });
    }
    Ok(())
}

#[async_trait::async_trait]
impl WireloftApi for HttpApiClient {
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError> {
        let url = self.endpoint(&["shows"])?;
        let endpoint = url.path().to_string();
        let shows: Vec<Show> = self.get_json(url, None).await?;
        require_ids(&endpoint, shows.iter().map(|s| s.id.as_str()))?;
        Ok(shows)
    }

    async fn get_show(&self, id: &str) -> Result<Show, ApiError> {
        let url = self.endpoint(&["shows", id])?;
        let endpoint = url.path().to_string();
        let show: Show = self.get_json(url, Some("Show")).await?;
        if show.id != id {
            return Err(ApiError::Decode {
                endpoint,
                message: format!("requested show {id}, got {}", show.id),
            });
        }
        Ok(show)
    }

    async fn update_show_config(
        &self,
        id: &str,
        body: &UpdateShowConfig,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&["shows", id])?;
        self.send_json(Method::PUT, url, body, Some("Show")).await
    }

    async fn list_media_profiles(&self) -> Result<Vec<MediaProfile>, ApiError> {
        let url = self.endpoint(&["media-profiles"])?;
        let endpoint = url.path().to_string();
        let profiles: Vec<MediaProfile> = self.get_json(url, None).await?;
        require_ids(&endpoint, profiles.iter().map(|p| p.id.as_str()))?;
        Ok(profiles)
    }

    async fn create_show(&self, request: &CreateShowRequest) -> Result<(), ApiError> {
        let url = self.endpoint(&["shows"])?;
        self.send_json(Method::POST, url, request, None).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint(&["health"])?;
        self.get_json(url, None).await
    }
}
