#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio::sync::oneshot;
use wireloft_core::{
    CreateShowRequest, Episode, EpisodeStatus, MediaProfile, PreferredFormat, Show,
    UpdateShowConfig,
};
use wireloft_infra::{ApiError, HealthStatus, WireloftApi};

pub type ShowReply = Result<Show, ApiError>;

/// In-process API double. Detail requests can be held open with [`FakeApi::gate_show`].
#[derive(Default)]
pub struct FakeApi {
    pub shows: Mutex<Vec<Show>>,
    pub profiles: Mutex<Vec<MediaProfile>>,
    /// `list_shows` fails this many more times before succeeding.
    pub list_failures: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub show_calls: Mutex<Vec<String>>,
    gates: Mutex<HashMap<String, VecDeque<oneshot::Receiver<ShowReply>>>>,
    pub created: Mutex<Vec<CreateShowRequest>>,
    pub reject_create: Mutex<Option<ApiError>>,
    pub updates: Mutex<Vec<(String, UpdateShowConfig)>>,
}

impl FakeApi {
    pub fn with_shows(shows: Vec<Show>) -> Self {
        let api = Self::default();
        *api.shows.lock().unwrap() = shows;
        api
    }

    /// The next `get_show(id)` waits for the returned sender.
    pub fn gate_show(&self, id: &str) -> oneshot::Sender<ShowReply> {
        let (tx, rx) = oneshot::channel();
        self.gates
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .push_back(rx);
        tx
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl WireloftApi for FakeApi {
    async fn list_shows(&self) -> Result<Vec<Show>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.list_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.list_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ApiError::Status {
                endpoint: "/api/shows".into(),
                status: 503,
            });
        }
        Ok(self.shows.lock().unwrap().clone())
    }

    async fn get_show(&self, id: &str) -> Result<Show, ApiError> {
        self.show_calls.lock().unwrap().push(id.to_string());
        let gate = self
            .gates
            .lock()
            .unwrap()
            .get_mut(id)
            .and_then(VecDeque::pop_front);
        if let Some(rx) = gate {
            return rx.await.unwrap_or(Err(ApiError::Cancelled));
        }
        self.shows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ApiError::NotFound {
                what: "Show".into(),
            })
    }

    async fn update_show_config(&self, id: &str, body: &UpdateShowConfig) -> Result<(), ApiError> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), body.clone()));
        Ok(())
    }

    async fn list_media_profiles(&self) -> Result<Vec<MediaProfile>, ApiError> {
        Ok(self.profiles.lock().unwrap().clone())
    }

    async fn create_show(&self, request: &CreateShowRequest) -> Result<(), ApiError> {
        if let Some(err) = self.reject_create.lock().unwrap().clone() {
            return Err(err);
        }
        self.created.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        Ok(HealthStatus {
            status: "ok".into(),
        })
    }
}

pub fn show(id: &str, title: &str) -> Show {
    Show {
        id: id.into(),
        author: "Ben Shapiro".into(),
        title: title.into(),
        years: None,
        episodes: vec![Episode {
            id: format!("{id}-1"),
            title: "Episode 1".into(),
            index: 1,
            cover: None,
            status: EpisodeStatus::Downloaded,
        }],
    }
}

pub fn profile(id: &str, name: &str) -> MediaProfile {
    MediaProfile {
        id: id.into(),
        name: name.into(),
        output_path_template: format!("D:/{name}/{{show}}"),
        preferred_format: PreferredFormat::UltraHd,
        download_series_images: false,
    }
}
