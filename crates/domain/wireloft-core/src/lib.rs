use serde::{Deserialize, Serialize};

pub mod draft;
pub mod interval;
pub mod schedule;
pub mod show_url;

pub use draft::{MediaProfileDraft, ShowSettingsDraft};
pub use show_url::{validate, ShowUrlValidationResult};

pub type ShowId = String;
pub type EpisodeId = String;
pub type MediaProfileId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeStatus {
    Downloaded,
    Downloading,
    Processing,
    Error,
}

impl EpisodeStatus {
    pub fn label(self) -> &'static str {
        match self {
            EpisodeStatus::Downloaded => "Downloaded",
            EpisodeStatus::Downloading => "Downloading",
            EpisodeStatus::Processing => "Waiting for processing",
            EpisodeStatus::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: EpisodeId,
    pub title: String,
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub status: EpisodeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: ShowId,
    pub author: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<String>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreferredFormat {
    #[serde(rename = "4k")]
    UltraHd,
    #[default]
    #[serde(rename = "1080p")]
    FullHd,
    #[serde(rename = "720p")]
    Hd,
    #[serde(rename = "Audio Only", alias = "AudioOnly")]
    AudioOnly,
}

impl PreferredFormat {
    pub const ALL: [PreferredFormat; 4] = [
        PreferredFormat::UltraHd,
        PreferredFormat::FullHd,
        PreferredFormat::Hd,
        PreferredFormat::AudioOnly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PreferredFormat::UltraHd => "4k",
            PreferredFormat::FullHd => "1080p",
            PreferredFormat::Hd => "720p",
            PreferredFormat::AudioOnly => "Audio Only",
        }
    }
}

impl std::fmt::Display for PreferredFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PreferredFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "4k" | "2160p" => Ok(PreferredFormat::UltraHd),
            "1080p" => Ok(PreferredFormat::FullHd),
            "720p" => Ok(PreferredFormat::Hd),
            "audioonly" | "audio" => Ok(PreferredFormat::AudioOnly),
            _ => Err(format!(
                "unknown format '{s}' (expected one of: 4k, 1080p, 720p, audio-only)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaProfile {
    pub id: MediaProfileId,
    pub name: String,
    pub output_path_template: String,
    pub preferred_format: PreferredFormat,
    pub download_series_images: bool,
}

impl MediaProfile {
    /// Form values for this profile, as shown when it is selected.
    pub fn to_draft(&self) -> MediaProfileDraft {
        MediaProfileDraft {
            name: self.name.clone(),
            output_path_template: self.output_path_template.clone(),
            preferred_format: self.preferred_format,
            download_series_images: self.download_series_images,
        }
    }
}

/// Payload emitted when the Add-Show wizard finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShowRequest {
    pub url: String,
    pub profile: MediaProfileDraft,
    pub show: ShowSettingsDraft,
}

/// Stored configuration of a tracked show, sent as `{config}` on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowConfig {
    pub url: String,
    pub media_profile_id: MediaProfileId,
    #[serde(flatten)]
    pub settings: ShowSettingsDraft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateShowConfig {
    pub config: ShowConfig,
}
