use wireloft_core::{MediaProfile, MediaProfileDraft, ShowSettingsDraft};

#[derive(Debug, Clone)]
pub enum WizardCommand {
    // Step 1
    SetUrl(String),

    // Navigation
    Continue,
    Back,

    // Step 2
    ToggleProfile(MediaProfile),
    EditProfile(MediaProfileDraft),

    // Step 3
    EditShow(ShowSettingsDraft),
}

/// Where the caller should go after a terminal wizard action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    Leave,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("show URL is not valid: {}", .0.join("; "))]
    InvalidUrl(Vec<String>),
    #[error("select a media profile or enter a profile name and output path")]
    ProfileIncomplete,
    #[error("already on the last step")]
    AlreadyAtReview,
    #[error("finish is only available on the review step")]
    NotAtReview,
}
