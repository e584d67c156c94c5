use wireloft_core::show_url::show_url_for_slug;
use wireloft_core::{
    MediaProfile, MediaProfileId, Show, ShowConfig, ShowSettingsDraft, UpdateShowConfig,
};
use wireloft_infra::{ApiError, WireloftApi};

use crate::cache::{QueryCache, QueryKey};
use crate::notify::NotificationBus;

/// Form state of the edit-show page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditShowForm {
    pub url: String,
    pub media_profile_id: MediaProfileId,
    pub settings: ShowSettingsDraft,
}

impl EditShowForm {
    pub fn for_show(show: &Show) -> Self {
        Self {
            url: show_url_for_slug(&show.id),
            media_profile_id: MediaProfileId::new(),
            settings: ShowSettingsDraft {
                name: show.title.clone(),
                author: show.author.clone(),
                download_days: String::new(),
                delete_older: false,
                ..ShowSettingsDraft::default()
            },
        }
    }

    /// Keep the selected profile if it still exists, otherwise take the first one.
    pub fn reconcile_profiles(&mut self, profiles: &[MediaProfile]) {
        let known = profiles.iter().any(|p| p.id == self.media_profile_id);
        if self.media_profile_id.is_empty() || !known {
            self.media_profile_id = profiles.first().map(|p| p.id.clone()).unwrap_or_default();
        }
    }

    pub fn to_update(&self) -> UpdateShowConfig {
        UpdateShowConfig {
            config: ShowConfig {
                url: self.url.trim().to_string(),
                media_profile_id: self.media_profile_id.clone(),
                settings: self.settings.clone(),
            },
        }
    }

    /// Send the form as `PUT /shows/{id}` and report the outcome on `notifications`.
    ///
    /// On success the show's cache entries are invalidated when a cache is given.
    pub async fn save(
        &self,
        api: &dyn WireloftApi,
        id: &str,
        notifications: &NotificationBus,
        cache: Option<&QueryCache>,
    ) -> Result<(), ApiError> {
        match api.update_show_config(id, &self.to_update()).await {
            Ok(()) => {
                if let Some(cache) = cache {
                    cache.invalidate(&QueryKey::Show(id.to_string()));
                    cache.invalidate(&QueryKey::Shows);
                }
                notifications.success(format!("Saved changes to {}", self.settings.name));
                Ok(())
            }
            Err(e) => {
                notifications.error(format!("Could not save show: {}", e.user_message()));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireloft_core::PreferredFormat;

    fn profile(id: &str) -> MediaProfile {
        MediaProfile {
            id: id.into(),
            name: id.to_uppercase(),
            output_path_template: "D:/{show}".into(),
            preferred_format: PreferredFormat::FullHd,
            download_series_images: true,
        }
    }

    fn show() -> Show {
        Show {
            id: "the-matt-walsh-show".into(),
            author: "Matt Walsh".into(),
            title: "The Matt Walsh Show".into(),
            years: None,
            episodes: vec![],
        }
    }

    #[test]
    fn prefills_from_show() {
        let form = EditShowForm::for_show(&show());
        assert_eq!(
            form.url,
            "https://www.dailywire.com/show/the-matt-walsh-show"
        );
        assert_eq!(form.settings.name, "The Matt Walsh Show");
        assert_eq!(form.settings.author, "Matt Walsh");
        assert!(form.settings.download_days.is_empty());
        assert!(!form.settings.delete_older);
    }

    #[test]
    fn unknown_profile_falls_back_to_first() {
        let mut form = EditShowForm::for_show(&show());
        form.media_profile_id = "gone".into();
        form.reconcile_profiles(&[profile("p1"), profile("p2")]);
        assert_eq!(form.media_profile_id, "p1");

        form.media_profile_id = "p2".into();
        form.reconcile_profiles(&[profile("p1"), profile("p2")]);
        assert_eq!(form.media_profile_id, "p2");

        form.reconcile_profiles(&[]);
        assert_eq!(form.media_profile_id, "");
    }

    #[test]
    fn update_body_wraps_config() {
        let mut form = EditShowForm::for_show(&show());
        form.media_profile_id = "p1".into();
        form.url = "  https://www.dailywire.com/show/x ".into();
        let body = serde_json::to_value(form.to_update()).unwrap();
        assert_eq!(body["config"]["url"], "https://www.dailywire.com/show/x");
        assert_eq!(body["config"]["mediaProfileId"], "p1");
        assert_eq!(body["config"]["name"], "The Matt Walsh Show");
    }
}
