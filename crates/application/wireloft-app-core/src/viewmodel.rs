use chrono::NaiveDate;
use wireloft_core::schedule::{download_delay_help, oldest_date_help, redownload_time_help};
use wireloft_core::{Episode, MediaProfile, MediaProfileId, Show, ShowId};

use crate::cache::CachedCollection;
use crate::wizard::{WizardState, WizardStep};

fn show_meta(show: &Show) -> String {
    match &show.years {
        Some(years) if !years.is_empty() => format!("{} episodes • {years}", show.episodes.len()),
        _ => format!("{} episodes", show.episodes.len()),
    }
}

fn initials(title: &str) -> String {
    title
        .split(' ')
        .filter_map(|w| w.chars().next())
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

fn series_images_label(on: bool) -> &'static str {
    if on {
        "Series images ✓"
    } else {
        "Series images ✕"
    }
}

/// Text shown instead of a list: the fetch error if there is one, else `empty`.
fn message_for<T>(c: &CachedCollection<T>, empty: &str) -> String {
    c.error.clone().unwrap_or_else(|| empty.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeVm {
    pub id: String,
    pub title: String,
    pub badge: String,
    pub status_label: &'static str,
    pub cover: Option<String>,
    /// Placeholder text when there is no cover image.
    pub initials: String,
}

impl From<&Episode> for EpisodeVm {
    fn from(ep: &Episode) -> Self {
        Self {
            id: ep.id.clone(),
            title: ep.title.clone(),
            badge: format!("#{}", ep.index),
            status_label: ep.status.label(),
            cover: ep.cover.clone(),
            initials: initials(&ep.title),
        }
    }
}

// --- Shows list ---

#[derive(Debug, Clone, PartialEq)]
pub struct ShowCardVm {
    pub id: ShowId,
    pub author: String,
    pub title: String,
    pub meta: String,
    pub episodes: Vec<EpisodeVm>,
}

impl From<&Show> for ShowCardVm {
    fn from(show: &Show) -> Self {
        Self {
            id: show.id.clone(),
            author: show.author.clone(),
            title: show.title.clone(),
            meta: show_meta(show),
            episodes: show.episodes.iter().map(EpisodeVm::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeVm {
    Loading,
    Message(String),
    Ready(Vec<ShowCardVm>),
}

pub fn home_vm(shows: &CachedCollection<Vec<Show>>) -> HomeVm {
    match &shows.data {
        None if shows.is_loading => HomeVm::Loading,
        Some(list) if !list.is_empty() => HomeVm::Ready(list.iter().map(ShowCardVm::from).collect()),
        _ => HomeVm::Message(message_for(shows, "No shows found")),
    }
}

// --- Show page ---

#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetailVm {
    pub id: ShowId,
    pub title: String,
    pub author: String,
    pub meta: String,
    pub episodes: Vec<EpisodeVm>,
    pub page: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl ShowDetailVm {
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShowPageVm {
    Loading,
    NotFound(String),
    Ready(ShowDetailVm),
}

/// Build the show page for the 1-based `page`, clamped to the available pages.
pub fn show_page_vm(show: &CachedCollection<Show>, page: usize) -> ShowPageVm {
    let show_data = match &show.data {
        Some(s) => s,
        None if show.is_loading => return ShowPageVm::Loading,
        None => return ShowPageVm::NotFound(message_for(show, "Show not found.")),
    };

    let page_size = wireloft_config::EPISODES_PAGE_SIZE;
    let total = show_data.episodes.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;

    ShowPageVm::Ready(ShowDetailVm {
        id: show_data.id.clone(),
        title: show_data.title.clone(),
        author: show_data.author.clone(),
        meta: show_meta(show_data),
        episodes: show_data
            .episodes
            .iter()
            .skip(start)
            .take(page_size)
            .map(EpisodeVm::from)
            .collect(),
        page,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
    })
}

// --- Media profiles ---

#[derive(Debug, Clone, PartialEq)]
pub struct MediaProfileRowVm {
    pub id: MediaProfileId,
    pub name: String,
    pub output_path_template: String,
    pub preferred_format: &'static str,
    pub series_images: &'static str,
}

impl From<&MediaProfile> for MediaProfileRowVm {
    fn from(p: &MediaProfile) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            output_path_template: p.output_path_template.clone(),
            preferred_format: p.preferred_format.label(),
            series_images: if p.download_series_images { "✓" } else { "✕" },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaProfilesVm {
    Loading,
    Message(String),
    Ready(Vec<MediaProfileRowVm>),
}

pub fn media_profiles_vm(profiles: &CachedCollection<Vec<MediaProfile>>) -> MediaProfilesVm {
    match &profiles.data {
        None if profiles.is_loading => MediaProfilesVm::Loading,
        Some(list) if !list.is_empty() => {
            MediaProfilesVm::Ready(list.iter().map(MediaProfileRowVm::from).collect())
        }
        _ => MediaProfilesVm::Message(message_for(profiles, "No profiles found")),
    }
}

// --- Add-show wizard ---

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileChoiceVm {
    pub id: MediaProfileId,
    pub name: String,
    pub output_path_template: String,
    pub preferred_format: &'static str,
    pub series_images: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileChoicesVm {
    Loading,
    Message(String),
    Ready(Vec<ProfileChoiceVm>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardReviewVm {
    pub url: String,
    pub profile_name: String,
    pub profile_path: String,
    pub profile_meta: String,
    /// Profile the draft was copied from. The submitted values are the draft's,
    /// even when they were edited after selection.
    pub linked_profile_id: Option<MediaProfileId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardVm {
    pub step: WizardStep,
    pub header: String,
    pub url_errors: Vec<String>,
    pub can_continue: bool,
    pub profiles: ProfileChoicesVm,
    pub profile_form_label: &'static str,
    pub review: WizardReviewVm,
    pub oldest_date_help: Option<String>,
    pub download_delay_help: Option<String>,
    pub redownload_help: Option<String>,
    pub last_error: Option<String>,
}

pub fn wizard_vm(
    state: &WizardState,
    last_error: Option<&str>,
    profiles: &CachedCollection<Vec<MediaProfile>>,
    today: NaiveDate,
) -> WizardVm {
    let validation = state.url_validation();
    let url_errors = if state.raw_url.trim().is_empty() {
        Vec::new()
    } else {
        validation.errors
    };

    let selected = state.selected_profile_id.as_deref();
    let choices = match &profiles.data {
        None if profiles.is_loading => ProfileChoicesVm::Loading,
        Some(list) if !list.is_empty() => ProfileChoicesVm::Ready(
            list.iter()
                .map(|p| ProfileChoiceVm {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    output_path_template: p.output_path_template.clone(),
                    preferred_format: p.preferred_format.label(),
                    series_images: series_images_label(p.download_series_images),
                    selected: selected == Some(p.id.as_str()),
                })
                .collect(),
        ),
        _ => ProfileChoicesVm::Message(message_for(profiles, "No profiles found")),
    };

    let draft = &state.profile_draft;
    let non_empty_or = |s: &str, fallback: &str| {
        if s.is_empty() {
            fallback.to_string()
        } else {
            s.to_string()
        }
    };
    let settings = &state.show_settings;

    WizardVm {
        step: state.step,
        header: format!("Step {} of 3: {}", state.step.number(), state.step.title()),
        url_errors,
        can_continue: state.can_continue(),
        profiles: choices,
        profile_form_label: if selected.is_some() {
            "Update current profile"
        } else {
            "Or create a new profile"
        },
        review: WizardReviewVm {
            url: state.submitted_url(),
            profile_name: non_empty_or(&draft.name, "(unnamed profile)"),
            profile_path: non_empty_or(&draft.output_path_template, "(no path set)"),
            profile_meta: format!(
                "{} • {}",
                draft.preferred_format,
                series_images_label(draft.download_series_images)
            ),
            linked_profile_id: state.selected_profile_id.clone(),
        },
        oldest_date_help: oldest_date_help(&settings.download_days, today)
            .map(|d| format!("Oldest date in range: {d}")),
        download_delay_help: download_delay_help(&settings.download_delay_minutes)
            .map(|t| format!("First download at {t}")),
        redownload_help: redownload_time_help(&settings.redownload_after_minutes)
            .map(|t| format!("Re-download at {t}")),
        last_error: last_error.map(str::to_string),
    }
}
