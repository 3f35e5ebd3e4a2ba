use clap::{ArgAction, Parser, Subcommand};
use commands::config::ConfigUpdate;
use commands::copy::CopyTarget;
use commands::mode::ModeArg;
use commands::update::UpdateField;
use commands::ListArgs;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "alist")]
#[command(about = "alist - manage your AniList anime list from the terminal")]
#[command(version)]
struct Cli {
    /// Refresh the cached list from AniList
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    refresh: bool,

    /// Visible entries threshold (negative shows all)
    #[arg(long, value_name = "N", default_value_t = 0, allow_negative_numbers = true, global = true)]
    max: i64,

    /// Display all entries (same as --max -1); with `clear`, clear everything
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    all: bool,

    /// Display only entries with the given status
    /// [watching|planning|completed|repeating|paused|dropped|all]
    #[arg(long, value_name = "STATUS", global = true)]
    status: Option<String>,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn list_args(&self) -> ListArgs {
        ListArgs {
            refresh: self.refresh,
            max: self.max,
            all: self.all,
            status: self.status.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the list (default command)
    List,

    /// Set the watched episodes value; without N the number is increased by one
    #[command(visible_alias = "episodes")]
    Eps {
        /// Episodes watched
        #[arg(value_name = "N", allow_negative_numbers = true)]
        episodes: Option<String>,

        /// Update the entry matching this title instead of the selected one
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },

    /// Set your status for the selected entry
    Status {
        /// watching|planning|completed|dropped|paused|repeating
        #[arg(value_name = "STATUS")]
        value: String,

        /// Update the entry matching this title instead of the selected one
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },

    /// Set your rating (0-10) for the selected entry
    Score {
        #[arg(value_name = "SCORE", allow_negative_numbers = true)]
        value: String,

        /// Update the entry matching this title instead of the selected one
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },

    /// Select an entry; without a title a fuzzy finder is opened
    #[command(visible_alias = "select")]
    Sel {
        #[arg(value_name = "TITLE", num_args = 0..)]
        title: Vec<String>,
    },

    /// Search torrents of the selected entry on nyaa.si
    #[command(visible_alias = "n")]
    Nyaa {
        /// Choose an alternative title
        #[arg(long, action = ArgAction::SetTrue)]
        alt: bool,

        /// Print the search URL instead of opening it
        #[arg(long, action = ArgAction::SetTrue)]
        print: bool,
    },

    /// Open the website of the selected entry, or set it when URL is given
    #[command(visible_alias = "website", args_conflicts_with_subcommands = true)]
    Web {
        #[command(subcommand)]
        cmd: Option<WebCommands>,

        #[arg(value_name = "URL")]
        url: Option<String>,

        /// Clear the website of the selected entry
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "url")]
        clear: bool,
    },

    /// Print the airing time of the next episode
    #[command(visible_alias = "broadcast")]
    Airing,

    /// Print opening and ending themes
    Music,

    /// Copy the title or website of the selected entry into the clipboard
    Copy {
        #[arg(value_enum)]
        what: CopyTarget,
    },

    /// Switch the app mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },

    /// Store and verify an AniList access token
    #[command(long_about = "Store an AniList access token. Without --token the token is read from the terminal; when anilist.client_id is configured the authorization page is opened first.")]
    Auth {
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },

    /// Clear cached data
    #[command(long_about = "Clear local state. Use --cache to remove the list snapshot, --credentials to remove the stored token, or --all for both.")]
    Clear {
        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,

        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum WebCommands {
    /// Print all stored websites
    GetAll,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the access token)
    Show {
        /// Show the access token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Change configuration values
    Set {
        /// Visible entries threshold; negative shows all, 0 is rejected
        #[arg(long, value_name = "N", allow_negative_numbers = true)]
        max_visible: Option<i64>,

        /// Default status filter, or "all"
        #[arg(long, value_name = "STATUS")]
        status_filter: Option<String>,

        /// Status auto-update: off|normal|after-threshold
        #[arg(long, value_name = "MODE")]
        auto_update: Option<String>,

        /// Browser executable; empty string restores the system default
        #[arg(long, value_name = "PATH")]
        browser: Option<String>,

        /// AniList API client id used for the authorization link
        #[arg(long, value_name = "ID")]
        client_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    let args = cli.list_args();

    let result = match cli.command {
        None | Some(Commands::List) => commands::list::run_list(&args, &output).await,
        Some(Commands::Eps { episodes, title }) => {
            commands::update::run_update(&args, UpdateField::Episodes(episodes), title, &output).await
        }
        Some(Commands::Status { value, title }) => {
            commands::update::run_update(&args, UpdateField::Status(value), title, &output).await
        }
        Some(Commands::Score { value, title }) => {
            commands::update::run_update(&args, UpdateField::Score(value), title, &output).await
        }
        Some(Commands::Sel { title }) => commands::select::run_select(&args, title, &output).await,
        Some(Commands::Nyaa { alt, print }) => commands::web::run_nyaa(&args, alt, print, &output).await,
        Some(Commands::Web { cmd: Some(WebCommands::GetAll), .. }) => {
            commands::web::run_web_get_all(&args, &output).await
        }
        Some(Commands::Web { cmd: None, url, clear }) => {
            commands::web::run_web(&args, url, clear, &output).await
        }
        Some(Commands::Airing) => commands::airing::run_airing(&args, &output).await,
        Some(Commands::Music) => commands::music::run_music(&args, &output).await,
        Some(Commands::Copy { what }) => commands::copy::run_copy(&args, what, &output).await,
        Some(Commands::Mode { mode }) => commands::mode::run_mode(mode, &output).await,
        Some(Commands::Auth { token }) => commands::auth::run_auth(token, &output).await,
        Some(Commands::Config { cmd: ConfigCommands::Show { full } }) => {
            commands::config::show_config(full, &output).await
        }
        Some(Commands::Config {
            cmd: ConfigCommands::Set { max_visible, status_filter, auto_update, browser, client_id },
        }) => {
            let update = ConfigUpdate { max_visible, status_filter, auto_update, browser, client_id };
            commands::config::set_config(update, &output).await
        }
        Some(Commands::Clear { cache, credentials }) => {
            commands::clear::run_clear(args.all, cache, credentials, &output).await
        }
    };

    if let Err(err) = &result {
        tracing::error!(error = %err, "Command failed");
        if !output.is_human() {
            output.error(err.to_string());
            std::process::exit(1);
        }
    }
    result
}
