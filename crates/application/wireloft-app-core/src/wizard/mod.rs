//! The three-step Add-Show wizard: URL, media profile, show settings.
//!
//! State changes go through [`reduce`]; [`AddShowWizard`] persists every accepted
//! change to the local store so an interrupted flow resumes where it stopped.

mod commands;
mod reducer;
mod state;

use std::sync::Arc;

use wireloft_core::CreateShowRequest;
use wireloft_persistence::{LocalStore, LocalStoreExt};

use crate::notify::NotificationBus;
use crate::ports::ShowCreator;

pub use commands::{Navigation, WizardCommand, WizardError};
pub use reducer::reduce;
pub use state::{WizardState, WizardStep};

pub fn load_draft(store: &dyn LocalStore) -> WizardState {
    store
        .load_json(wireloft_config::WIZARD_STORAGE_KEY)
        .unwrap_or_default()
}

pub fn save_draft(store: &dyn LocalStore, state: &WizardState) {
    store.save_json(wireloft_config::WIZARD_STORAGE_KEY, state);
}

pub fn clear_draft(store: &dyn LocalStore) {
    store.forget(wireloft_config::WIZARD_STORAGE_KEY);
}

pub struct AddShowWizard {
    state: WizardState,
    last_error: Option<String>,
    store: Arc<dyn LocalStore>,
    notifications: NotificationBus,
}

impl AddShowWizard {
    /// Restore the persisted draft, or start fresh when there is none.
    pub fn mount(store: Arc<dyn LocalStore>, notifications: NotificationBus) -> Self {
        let state = load_draft(store.as_ref());
        tracing::debug!(step = state.step.number(), "add-show wizard mounted");
        Self {
            state,
            last_error: None,
            store,
            notifications,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Error from the last rejected Finish. Not persisted.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dispatch(&mut self, cmd: WizardCommand) -> Result<(), WizardError> {
        let next = reduce(&self.state, cmd)?;
        if next != self.state {
            self.state = next;
            self.last_error = None;
            save_draft(self.store.as_ref(), &self.state);
        }
        Ok(())
    }

    pub fn cancel(&mut self) -> Navigation {
        clear_draft(self.store.as_ref());
        self.state = WizardState::default();
        self.last_error = None;
        Navigation::Leave
    }

    /// Payload Finish submits. The current form values always win over the selected profile.
    pub fn request(&self) -> CreateShowRequest {
        CreateShowRequest {
            url: self.state.submitted_url(),
            profile: self.state.profile_draft.clone(),
            show: self.state.show_settings.clone(),
        }
    }

    /// Submit the request once. A rejection keeps the wizard on the review step.
    pub async fn finish<C>(&mut self, creator: &C) -> Result<Navigation, WizardError>
    where
        C: ShowCreator + ?Sized,
    {
        if self.state.step != WizardStep::Review {
            return Err(WizardError::NotAtReview);
        }

        let request = self.request();
        match creator.create_show(&request).await {
            Ok(()) => {
                clear_draft(self.store.as_ref());
                self.state = WizardState::default();
                self.last_error = None;
                self.notifications
                    .success(format!("Show added: {}", request.url));
                Ok(Navigation::Leave)
            }
            Err(e) => {
                let message = e.user_message();
                self.notifications
                    .error(format!("Could not add show: {message}"));
                self.last_error = Some(message);
                Ok(Navigation::Stay)
            }
        }
    }
}
