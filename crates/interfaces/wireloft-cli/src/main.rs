use anyhow::{bail, Context};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use wireloft_app_core::{Bootstrap, Navigation, WizardCommand};
use wireloft_cli::{commands, wizard, ProfileFields, ShowFields};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Base URL of the WireLoft API
    #[arg(long, global = true, env = wireloft_config::API_BASE_ENV, default_value = wireloft_config::DEFAULT_API_BASE)]
    api: String,
    /// Directory of the local store (defaults to the platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<Utf8PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a Daily Wire show URL without contacting the API
    #[command(name = "validate-url")]
    ValidateUrl { url: String },
    Shows {
        #[command(subcommand)]
        command: ShowsCommands,
    },
    /// Manage media profiles
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommands,
    },
    /// Change a show's media profile and download settings
    #[command(name = "edit-show")]
    EditShow {
        id: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(short, long, help = "Media profile ID")]
        profile: Option<String>,
        #[command(flatten)]
        fields: ShowFields,
    },
    /// Add a show step by step; progress is kept between runs
    Wizard {
        #[command(subcommand)]
        command: WizardCommands,
    },
    Health,
}

#[derive(Subcommand)]
enum ShowsCommands {
    List,
    Show {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

#[derive(Subcommand)]
enum ProfilesCommands {
    List,
}

#[derive(Subcommand)]
enum WizardCommands {
    Status,
    Url { url: String },
    Continue,
    Back,
    /// Select a saved media profile; selecting it again deselects it
    Select { profile_id: String },
    Profile {
        #[command(flatten)]
        fields: ProfileFields,
    },
    Show {
        #[command(flatten)]
        fields: ShowFields,
    },
    Finish,
    Cancel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("default subscriber")?;

    if let Commands::ValidateUrl { url } = &cli.command {
        let result = commands::cmd_validate_url(url);
        if !result.is_valid() {
            bail!("Invalid show URL");
        }
        return Ok(());
    }

    let app = Bootstrap {
        api_base: cli.api,
        data_dir: cli.data_dir,
        prefetch: false,
    }
    .init()?;
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Commands::ValidateUrl { .. } => {}
        Commands::Shows { command } => match command {
            ShowsCommands::List => {
                commands::cmd_shows_list(&app).await?;
            }
            ShowsCommands::Show { id, page } => {
                commands::cmd_show(&app, &id, page).await?;
            }
        },
        Commands::Profiles { command } => match command {
            ProfilesCommands::List => {
                commands::cmd_profiles_list(&app).await?;
            }
        },
        Commands::EditShow {
            id,
            url,
            profile,
            fields,
        } => {
            commands::cmd_edit_show(&app, &id, url, profile, &fields).await?;
        }
        Commands::Wizard { command } => match command {
            WizardCommands::Status => {
                wizard::status(&app, today).await;
            }
            WizardCommands::Url { url } => {
                wizard::apply(&app, WizardCommand::SetUrl(url), today).await?;
            }
            WizardCommands::Continue => {
                wizard::apply(&app, WizardCommand::Continue, today).await?;
            }
            WizardCommands::Back => {
                wizard::apply(&app, WizardCommand::Back, today).await?;
            }
            WizardCommands::Select { profile_id } => {
                wizard::select(&app, &profile_id, today).await?;
            }
            WizardCommands::Profile { fields } => {
                wizard::edit_profile(&app, &fields, today).await?;
            }
            WizardCommands::Show { fields } => {
                wizard::edit_show(&app, &fields, today).await?;
            }
            WizardCommands::Finish => {
                if wizard::finish(&app).await? == Navigation::Stay {
                    bail!("Show was not added; the draft is kept");
                }
            }
            WizardCommands::Cancel => {
                wizard::cancel(&app);
            }
        },
        Commands::Health => {
            commands::cmd_health(&app).await?;
        }
    }

    Ok(())
}
