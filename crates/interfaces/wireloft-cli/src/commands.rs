use anyhow::{bail, Context, Result};
use wireloft_app_core::{
    home_vm, media_profiles_vm, show_page_vm, CachedCollection, EditShowForm, HomeVm,
    MediaProfilesVm, QueryData, QueryKey, ShowPageVm, WireloftApplication,
};
use wireloft_core::{ShowUrlValidationResult, UpdateShowConfig};
use wireloft_infra::{HealthStatus, WireloftApi};

use crate::{print_notifications, ShowFields};

fn rule(ok: bool, label: &str) {
    println!("   {} {label}", if ok { "✓" } else { "✕" });
}

/// Warn when the printed data is a saved copy because the refresh failed.
fn note_stale<T>(collection: &CachedCollection<T>) {
    if let (Some(_), Some(err)) = (&collection.data, &collection.error) {
        eprintln!(":: Refresh failed ({err}); showing saved data");
    }
}

pub fn cmd_validate_url(input: &str) -> ShowUrlValidationResult {
    let result = wireloft_core::validate(input);

    println!(":: Checking {}", input.trim());
    rule(result.domain_ok, "Domain is dailywire.com");
    rule(result.path_ok, "Path starts with /show/");
    rule(result.slug_ok, "Show name follows /show/");
    if let Some(normalized) = &result.normalized {
        println!("   Normalized: {normalized}");
    }
    for err in &result.errors {
        println!("   {err}");
    }

    result
}

pub async fn cmd_shows_list(app: &WireloftApplication) -> Result<HomeVm> {
    let shows = app
        .cache
        .fetch(QueryKey::Shows)
        .await
        .map(QueryData::into_shows);
    let vm = home_vm(&shows);

    match &vm {
        HomeVm::Loading => println!("Loading…"),
        HomeVm::Message(msg) if shows.error.is_some() => bail!("Could not load shows: {msg}"),
        HomeVm::Message(msg) => println!("{msg}"),
        HomeVm::Ready(cards) => {
            note_stale(&shows);
            println!("{:<32} {:<36} {:<20} {}", "ID", "TITLE", "AUTHOR", "EPISODES");
            println!("{:-<32} {:-<36} {:-<20} {:-<20}", "", "", "", "");
            for card in cards {
                println!(
                    "{:<32} {:<36} {:<20} {}",
                    card.id, card.title, card.author, card.meta
                );
            }
        }
    }

    Ok(vm)
}

pub async fn cmd_show(app: &WireloftApplication, id: &str, page: usize) -> Result<ShowPageVm> {
    let show = app
        .cache
        .fetch(QueryKey::Show(id.to_string()))
        .await
        .map(QueryData::into_show);
    let vm = show_page_vm(&show, page);

    match &vm {
        ShowPageVm::Loading => println!("Loading…"),
        ShowPageVm::NotFound(msg) => bail!("{msg}"),
        ShowPageVm::Ready(detail) => {
            note_stale(&show);
            println!(":: {}", detail.title);
            println!("   {} • {}", detail.author, detail.meta);
            println!();
            for ep in &detail.episodes {
                println!("{:>5}  {:<60} {}", ep.badge, ep.title, ep.status_label);
            }
            if detail.total_pages > 1 {
                println!();
                println!("{}", detail.page_label());
            }
        }
    }

    Ok(vm)
}

pub async fn cmd_profiles_list(app: &WireloftApplication) -> Result<MediaProfilesVm> {
    let profiles = app
        .cache
        .fetch(QueryKey::MediaProfiles)
        .await
        .map(QueryData::into_media_profiles);
    let vm = media_profiles_vm(&profiles);

    match &vm {
        MediaProfilesVm::Loading => println!("Loading…"),
        MediaProfilesVm::Message(msg) if profiles.error.is_some() => {
            bail!("Could not load media profiles: {msg}")
        }
        MediaProfilesVm::Message(msg) => println!("{msg}"),
        MediaProfilesVm::Ready(rows) => {
            note_stale(&profiles);
            println!(
                "{:<20} {:<24} {:<10} {:<7} {}",
                "ID", "NAME", "FORMAT", "IMAGES", "OUTPUT PATH"
            );
            println!("{:-<20} {:-<24} {:-<10} {:-<7} {:-<30}", "", "", "", "", "");
            for row in rows {
                println!(
                    "{:<20} {:<24} {:<10} {:<7} {}",
                    row.id, row.name, row.preferred_format, row.series_images, row.output_path_template
                );
            }
        }
    }

    Ok(vm)
}

/// Load the show into the edit form, apply the overrides and save.
pub async fn cmd_edit_show(
    app: &WireloftApplication,
    id: &str,
    url: Option<String>,
    profile: Option<String>,
    fields: &ShowFields,
) -> Result<UpdateShowConfig> {
    let show = app
        .cache
        .fetch(QueryKey::Show(id.to_string()))
        .await
        .map(QueryData::into_show);
    let Some(show) = show.data else {
        bail!("{}", show.error.as_deref().unwrap_or("Show not found."));
    };
    let profiles = app
        .cache
        .fetch(QueryKey::MediaProfiles)
        .await
        .map(QueryData::into_media_profiles)
        .data
        .unwrap_or_default();

    let mut form = EditShowForm::for_show(&show);
    if let Some(wanted) = profile {
        if !profiles.iter().any(|p| p.id == wanted) {
            bail!("Media profile '{wanted}' not found");
        }
        form.media_profile_id = wanted;
    }
    form.reconcile_profiles(&profiles);
    if let Some(url) = url {
        form.url = url;
    }
    fields.apply(&mut form.settings);

    if form.media_profile_id.is_empty() {
        tracing::warn!("saving {id} without a media profile");
    }

    let mut notes = app.notifications.subscribe();
    let saved = form
        .save(app.api.as_ref(), id, &app.notifications, Some(&app.cache))
        .await;
    print_notifications(&mut notes);
    saved.with_context(|| format!("Failed to save show {id}"))?;

    Ok(form.to_update())
}

pub async fn cmd_health(app: &WireloftApplication) -> Result<HealthStatus> {
    let health = app
        .api
        .health()
        .await
        .context("API health check failed")?;
    println!("API status: {}", health.status);
    Ok(health)
}
