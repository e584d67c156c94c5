use serde::{Deserialize, Serialize};

use crate::PreferredFormat;

/// Media profile form values, either typed in or copied from a selected profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaProfileDraft {
    pub name: String,
    /// Destination path with placeholders such as `{show}` and `{season}`.
    pub output_path_template: String,
    pub preferred_format: PreferredFormat,
    pub download_series_images: bool,
}

impl Default for MediaProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            output_path_template: String::new(),
            preferred_format: PreferredFormat::FullHd,
            download_series_images: true,
        }
    }
}

impl MediaProfileDraft {
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.output_path_template.trim().is_empty()
    }
}

/// Per-show download policy form values.
///
/// Numeric fields stay text so an emptied input survives a save/restore cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowSettingsDraft {
    pub name: String,
    pub author: String,
    pub download_media: bool,
    pub download_delay_minutes: String,
    pub redownload_after_minutes: String,
    pub download_days: String,
    pub delete_older: bool,
    pub title_filter: String,
}

impl Default for ShowSettingsDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            author: String::new(),
            download_media: true,
            download_delay_minutes: wireloft_config::DEFAULT_DOWNLOAD_DELAY_MINUTES.to_string(),
            redownload_after_minutes: wireloft_config::DEFAULT_REDOWNLOAD_AFTER_MINUTES
                .to_string(),
            download_days: wireloft_config::DEFAULT_DOWNLOAD_DAYS.to_string(),
            delete_older: true,
            title_filter: String::new(),
        }
    }
}
