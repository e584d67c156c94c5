pub mod commands;
pub mod wizard;

use clap::Args;
use tokio::sync::broadcast;
use wireloft_app_core::{Notification, NotificationLevel};
use wireloft_core::interval::MinutesInterval;
use wireloft_core::{MediaProfileDraft, PreferredFormat, ShowSettingsDraft};

/// Media profile fields to overwrite. Unset flags keep the current value.
#[derive(Args, Clone, Debug, Default)]
pub struct ProfileFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Output path template, e.g. `D:/Media/{show}`
    #[arg(long = "template")]
    pub output_path_template: Option<String>,
    /// 4k, 1080p, 720p or audio-only
    #[arg(long)]
    pub format: Option<PreferredFormat>,
    #[arg(long)]
    pub series_images: Option<bool>,
}

impl ProfileFields {
    pub fn apply(&self, draft: &mut MediaProfileDraft) {
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(template) = &self.output_path_template {
            draft.output_path_template = template.clone();
        }
        if let Some(format) = self.format {
            draft.preferred_format = format;
        }
        if let Some(images) = self.series_images {
            draft.download_series_images = images;
        }
    }
}

/// Show settings to overwrite. Unset flags keep the current value.
#[derive(Args, Clone, Debug, Default)]
pub struct ShowFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub download_media: Option<bool>,
    /// Delay after publish before the first download: minutes, H:MM or 1h30m
    #[arg(long)]
    pub download_delay: Option<MinutesInterval>,
    /// Delay after publish before re-downloading: minutes, H:MM or 1h30m
    #[arg(long)]
    pub redownload_after: Option<MinutesInterval>,
    /// Only keep episodes from the last N days
    #[arg(long)]
    pub download_days: Option<String>,
    #[arg(long)]
    pub delete_older: Option<bool>,
    #[arg(long)]
    pub title_filter: Option<String>,
}

impl ShowFields {
    pub fn apply(&self, settings: &mut ShowSettingsDraft) {
        let text = |value: &Option<String>, field: &mut String| {
            if let Some(v) = value {
                *field = v.clone();
            }
        };
        text(&self.name, &mut settings.name);
        text(&self.author, &mut settings.author);
        let minutes = |value: &Option<MinutesInterval>, field: &mut String| {
            if let Some(v) = value {
                *field = v.to_field(field);
            }
        };
        minutes(&self.download_delay, &mut settings.download_delay_minutes);
        minutes(&self.redownload_after, &mut settings.redownload_after_minutes);
        text(&self.download_days, &mut settings.download_days);
        text(&self.title_filter, &mut settings.title_filter);
        if let Some(v) = self.download_media {
            settings.download_media = v;
        }
        if let Some(v) = self.delete_older {
            settings.delete_older = v;
        }
    }
}

/// Print every notification published since `rx` subscribed.
pub fn print_notifications(rx: &mut broadcast::Receiver<Notification>) {
    while let Ok(note) = rx.try_recv() {
        match note.level {
            NotificationLevel::Success => println!("✓ {}", note.message),
            NotificationLevel::Error => eprintln!("✕ {}", note.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_fields_keep_draft_values() {
        let mut settings = ShowSettingsDraft::default();
        ShowFields {
            download_days: Some(String::new()),
            delete_older: Some(false),
            ..ShowFields::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.download_days, "");
        assert!(!settings.delete_older);
        assert_eq!(settings.download_delay_minutes, "90");
        assert!(settings.download_media);
    }

    #[test]
    fn interval_flags_are_stored_as_total_minutes() {
        let mut settings = ShowSettingsDraft::default();
        ShowFields {
            download_delay: Some("1h30m".parse().unwrap()),
            redownload_after: Some("4:15".parse().unwrap()),
            ..ShowFields::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.download_delay_minutes, "90");
        assert_eq!(settings.redownload_after_minutes, "255");

        settings.download_delay_minutes.clear();
        ShowFields {
            download_delay: Some("0".parse().unwrap()),
            ..ShowFields::default()
        }
        .apply(&mut settings);
        assert_eq!(settings.download_delay_minutes, "");
    }

    #[test]
    fn unreadable_interval_flag_is_rejected_by_the_parser() {
        use clap::Parser;

        #[derive(Parser)]
        struct Cmd {
            #[command(flatten)]
            fields: ShowFields,
        }

        let cmd = Cmd::try_parse_from(["wireloft", "--download-delay", "2h"]).unwrap();
        assert_eq!(
            cmd.fields.download_delay,
            Some(MinutesInterval { hours: 2, minutes: 0 })
        );
        assert!(Cmd::try_parse_from(["wireloft", "--download-delay", "soon"]).is_err());
        assert!(Cmd::try_parse_from(["wireloft", "--redownload-after", "1h30"]).is_err());
    }

    #[test]
    fn profile_fields_overwrite_selected_values() {
        let mut draft = MediaProfileDraft::default();
        ProfileFields {
            name: Some("Mobile".into()),
            format: Some(PreferredFormat::Hd),
            ..ProfileFields::default()
        }
        .apply(&mut draft);
        assert_eq!(draft.name, "Mobile");
        assert_eq!(draft.preferred_format, PreferredFormat::Hd);
        assert!(draft.output_path_template.is_empty());
    }
}
