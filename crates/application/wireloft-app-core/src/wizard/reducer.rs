use super::commands::{WizardCommand, WizardError};
use super::state::{WizardState, WizardStep};

/// Apply one command. A rejected command leaves the input state untouched.
pub fn reduce(state: &WizardState, cmd: WizardCommand) -> Result<WizardState, WizardError> {
    let mut next = state.clone();
    match cmd {
        WizardCommand::SetUrl(raw) => next.raw_url = raw,

        WizardCommand::Continue => {
            next.step = match state.step {
                WizardStep::Url => {
                    let result = state.url_validation();
                    if !result.is_valid() {
                        return Err(WizardError::InvalidUrl(result.errors));
                    }
                    WizardStep::Profile
                }
                WizardStep::Profile => {
                    if !state.can_continue() {
                        return Err(WizardError::ProfileIncomplete);
                    }
                    WizardStep::Review
                }
                WizardStep::Review => return Err(WizardError::AlreadyAtReview),
            };
        }

        WizardCommand::Back => {
            next.step = match state.step {
                WizardStep::Url | WizardStep::Profile => WizardStep::Url,
                WizardStep::Review => WizardStep::Profile,
            };
        }

        WizardCommand::ToggleProfile(profile) => {
            if state.selected_profile_id.as_deref() == Some(profile.id.as_str()) {
                next.selected_profile_id = None;
                next.profile_draft = next
                    .saved_profile_draft_before_selection
                    .take()
                    .unwrap_or_default();
            } else {
                // Only the first selection snapshots; switching keeps the original custom draft.
                if state.selected_profile_id.is_none() {
                    next.saved_profile_draft_before_selection = Some(state.profile_draft.clone());
                }
                next.selected_profile_id = Some(profile.id.clone());
                next.profile_draft = profile.to_draft();
            }
        }

        WizardCommand::EditProfile(draft) => next.profile_draft = draft,
        WizardCommand::EditShow(settings) => next.show_settings = settings,
    }
    Ok(next)
}
