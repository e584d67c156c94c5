pub mod bootstrap;
pub mod cache;
pub mod edit_show;
pub mod notify;
pub mod ports;
pub mod viewmodel;
pub mod wizard;

pub use bootstrap::{Bootstrap, WireloftApplication};
pub use cache::{CachePolicy, CachedCollection, QueryCache, QueryData, QueryKey, QueryObserver};
pub use edit_show::EditShowForm;
pub use notify::{Notification, NotificationBus, NotificationLevel};
pub use ports::*;
pub use viewmodel::*;
pub use wizard::{AddShowWizard, Navigation, WizardCommand, WizardError, WizardState, WizardStep};
