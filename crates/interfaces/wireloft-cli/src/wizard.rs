//! `wireloft wizard ...`: the Add-Show wizard, one step per invocation.
//!
//! Every command mounts the wizard from the local store, applies one change and
//! prints the resulting step, so the draft carries over between runs.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use wireloft_app_core::{
    wizard_vm, AddShowWizard, CachedCollection, Navigation, ProfileChoicesVm, QueryData,
    QueryKey, WireloftApplication, WizardCommand, WizardStep, WizardVm,
};
use wireloft_core::interval::MinutesInterval;
use wireloft_core::schedule::parse_non_negative;
use wireloft_core::MediaProfile;

use crate::{print_notifications, ProfileFields, ShowFields};

async fn profiles(app: &WireloftApplication) -> CachedCollection<Vec<MediaProfile>> {
    app.cache
        .fetch(QueryKey::MediaProfiles)
        .await
        .map(QueryData::into_media_profiles)
}

async fn render(app: &WireloftApplication, wizard: &AddShowWizard, today: NaiveDate) -> WizardVm {
    let profiles = if wizard.state().step == WizardStep::Profile {
        profiles(app).await
    } else {
        CachedCollection::default()
    };
    let vm = wizard_vm(wizard.state(), wizard.last_error(), &profiles, today);
    print_vm(wizard, &vm);
    vm
}

fn print_vm(wizard: &AddShowWizard, vm: &WizardVm) {
    let state = wizard.state();
    println!(":: {}", vm.header);

    match vm.step {
        WizardStep::Url => {
            println!("   URL: {}", state.raw_url);
            for err in &vm.url_errors {
                println!("   ✕ {err}");
            }
        }
        WizardStep::Profile => {
            match &vm.profiles {
                ProfileChoicesVm::Loading => println!("   Loading profiles…"),
                ProfileChoicesVm::Message(msg) => println!("   {msg}"),
                ProfileChoicesVm::Ready(choices) => {
                    for c in choices {
                        println!(
                            "   [{}] {:<20} {:<24} {} • {}",
                            if c.selected { "x" } else { " " },
                            c.id,
                            c.name,
                            c.preferred_format,
                            c.series_images
                        );
                    }
                }
            }
            let draft = &state.profile_draft;
            println!();
            println!("   {}", vm.profile_form_label);
            println!("   Name:     {}", draft.name);
            println!("   Template: {}", draft.output_path_template);
            println!("   Format:   {}", draft.preferred_format);
            println!("   Series images: {}", draft.download_series_images);
        }
        WizardStep::Review => {
            let review = &vm.review;
            let settings = &state.show_settings;
            println!("   URL:      {}", review.url);
            println!("   Profile:  {} ({})", review.profile_name, review.profile_path);
            println!("             {}", review.profile_meta);
            if let Some(id) = &review.linked_profile_id {
                println!("             copied from profile {id}");
            }
            println!();
            println!("   Name:           {}", settings.name);
            println!("   Author:         {}", settings.author);
            println!("   Download media: {}", settings.download_media);
            println!("   Title filter:   {}", settings.title_filter);
            let help = |h: &Option<String>| h.as_deref().map(|t| format!("  ({t})")).unwrap_or_default();
            let span = |total: &str| match parse_non_negative(total) {
                Some(n) => format!("{n} min ({})", MinutesInterval::from_total(total)),
                None => total.to_string(),
            };
            println!(
                "   Download delay: {}{}",
                span(&settings.download_delay_minutes),
                help(&vm.download_delay_help)
            );
            println!(
                "   Re-download:    {}{}",
                span(&settings.redownload_after_minutes),
                help(&vm.redownload_help)
            );
            println!(
                "   Download days:  {}{}",
                settings.download_days,
                help(&vm.oldest_date_help)
            );
            println!("   Delete older:   {}", settings.delete_older);
        }
    }

    if let Some(err) = &vm.last_error {
        println!("   ✕ {err}");
    }
}

pub async fn status(app: &WireloftApplication, today: NaiveDate) -> WizardVm {
    let wizard = app.wizard();
    render(app, &wizard, today).await
}

/// Apply one command and persist the result.
pub async fn apply(
    app: &WireloftApplication,
    cmd: WizardCommand,
    today: NaiveDate,
) -> Result<WizardVm> {
    let mut wizard = app.wizard();
    wizard.dispatch(cmd)?;
    Ok(render(app, &wizard, today).await)
}

/// Select `profile_id`, or deselect it when it is already selected.
pub async fn select(
    app: &WireloftApplication,
    profile_id: &str,
    today: NaiveDate,
) -> Result<WizardVm> {
    let list = profiles(app).await;
    let profile = list
        .data
        .unwrap_or_default()
        .into_iter()
        .find(|p| p.id == profile_id)
        .ok_or_else(|| match list.error {
            Some(err) => anyhow!("Could not load media profiles: {err}"),
            None => anyhow!("Media profile '{profile_id}' not found"),
        })?;
    apply(app, WizardCommand::ToggleProfile(profile), today).await
}

pub async fn edit_profile(
    app: &WireloftApplication,
    fields: &ProfileFields,
    today: NaiveDate,
) -> Result<WizardVm> {
    let mut draft = app.wizard().state().profile_draft.clone();
    fields.apply(&mut draft);
    apply(app, WizardCommand::EditProfile(draft), today).await
}

pub async fn edit_show(
    app: &WireloftApplication,
    fields: &ShowFields,
    today: NaiveDate,
) -> Result<WizardVm> {
    let mut settings = app.wizard().state().show_settings.clone();
    fields.apply(&mut settings);
    apply(app, WizardCommand::EditShow(settings), today).await
}

pub async fn finish(app: &WireloftApplication) -> Result<Navigation> {
    let mut wizard = app.wizard();
    let mut notes = app.notifications.subscribe();
    let nav = wizard.finish(app.api.as_ref()).await?;
    print_notifications(&mut notes);
    if nav == Navigation::Leave {
        app.cache.invalidate(&QueryKey::Shows);
    }
    Ok(nav)
}

pub fn cancel(app: &WireloftApplication) -> Navigation {
    let nav = app.wizard().cancel();
    println!(":: Add-show draft discarded");
    nav
}
