use serde::{Deserialize, Serialize};
use wireloft_core::{MediaProfileDraft, MediaProfileId, ShowSettingsDraft};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    #[default]
    Url,
    Profile,
    Review,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        u8::from(self)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Url => "URL",
            WizardStep::Profile => "Media Profile",
            WizardStep::Review => "Show",
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        match step {
            WizardStep::Url => 1,
            WizardStep::Profile => 2,
            WizardStep::Review => 3,
        }
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(WizardStep::Url),
            2 => Ok(WizardStep::Profile),
            3 => Ok(WizardStep::Review),
            other => Err(format!("wizard step must be 1, 2 or 3, got {other}")),
        }
    }
}

/// Everything the Add-Show wizard persists between sessions.
///
/// Missing fields in stored JSON fall back to the product defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WizardState {
    pub step: WizardStep,
    pub raw_url: String,
    pub selected_profile_id: Option<MediaProfileId>,
    pub profile_draft: MediaProfileDraft,
    /// Custom draft held aside while an existing profile is selected.
    pub saved_profile_draft_before_selection: Option<MediaProfileDraft>,
    pub show_settings: ShowSettingsDraft,
}

impl WizardState {
    pub fn url_validation(&self) -> wireloft_core::ShowUrlValidationResult {
        wireloft_core::validate(&self.raw_url)
    }

    /// URL submitted on Finish: the normalized form when the input parsed.
    pub fn submitted_url(&self) -> String {
        self.url_validation()
            .normalized
            .unwrap_or_else(|| self.raw_url.clone())
    }

    pub fn can_continue(&self) -> bool {
        match self.step {
            WizardStep::Url => self.url_validation().is_valid(),
            WizardStep::Profile => {
                self.selected_profile_id.is_some() || self.profile_draft.is_valid()
            }
            WizardStep::Review => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wireloft_core::PreferredFormat;

    #[test]
    fn defaults_match_product_defaults() {
        let s = WizardState::default();
        assert_eq!(s.step, WizardStep::Url);
        assert!(s.raw_url.is_empty());
        assert!(s.selected_profile_id.is_none());
        assert_eq!(s.profile_draft.preferred_format, PreferredFormat::FullHd);
        assert!(s.profile_draft.download_series_images);
        assert!(s.show_settings.download_media);
        assert!(s.show_settings.delete_older);
        assert_eq!(s.show_settings.download_days, "180");
        assert_eq!(s.show_settings.download_delay_minutes, "90");
        assert_eq!(s.show_settings.redownload_after_minutes, "180");
    }

    #[test]
    fn step_is_stored_as_a_number() {
        let s = WizardState {
            step: WizardStep::Review,
            ..WizardState::default()
        };
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["step"], 3);
        assert!(serde_json::from_str::<WizardState>(r#"{"step": 4}"#).is_err());
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let s: WizardState =
            serde_json::from_str(r#"{"step": 2, "rawUrl": "dailywire.com/show/x"}"#).unwrap();
        assert_eq!(s.step, WizardStep::Profile);
        assert_eq!(s.raw_url, "dailywire.com/show/x");
        assert_eq!(s.show_settings.download_days, "180");
    }

    #[test]
    fn submitted_url_prefers_normalized_form() {
        let s = WizardState {
            raw_url: "dailywire.com/show/the-ben-shapiro-show".into(),
            ..WizardState::default()
        };
        assert_eq!(
            s.submitted_url(),
            "https://dailywire.com/show/the-ben-shapiro-show"
        );

        let s = WizardState {
            raw_url: "http://[bad".into(),
            ..WizardState::default()
        };
        assert_eq!(s.submitted_url(), "http://[bad");
    }
}
