use std::path::PathBuf;

use anyhow::Context;
use breaker_client::BreakerClient;
use breaker_core::views::RankingSort;
use breaker_core::Config;
use clap::{Parser, Subcommand};
use colored::Colorize;
use session_manager::{FileKeyValueStorage, KeyValueStorage, MemoryKeyValueStorage, SessionManager};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "breaker")]
#[command(about = "Command-line dashboard for BreakerBot")]
#[command(version)]
struct Cli {
    /// API base URL (overrides config and BREAKERBOT_API_URL)
    #[arg(long, env = "BREAKERBOT_API_URL")]
    api_url: Option<String>,

    /// Directory holding the saved session
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Enable debug logging
    #[arg(long, short)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a login code to a phone number
    RequestCode {
        /// Phone number, any formatting
        phone: String,
    },
    /// Log in with the code received
    Login { code: String },
    Logout,
    /// Show the current session
    Status,
    /// Show or edit your profile
    Profile {
        /// Set a custom display name
        #[arg(long)]
        custom_name: Option<String>,
        /// Show the custom name instead of the push name
        #[arg(long)]
        use_custom_name: Option<bool>,
        #[arg(long)]
        allow_mentions: Option<bool>,
        /// Emoji the bot reacts with
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long)]
        emoji_reaction: Option<bool>,
    },
    /// List users by XP, level, messages or prestige
    Ranking {
        #[arg(long, default_value = "xp")]
        sort: RankingSort,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// List backups of deleted users
    Backups,
    /// Restore a deleted user from its backup
    RestoreBackup { id: String },
    /// Show your secret santa groups
    SecretSanta {
        /// Filter participants by name, id or gift
        #[arg(long)]
        search: Option<String>,
    },
    /// Show aura tiers, missions and random events
    Aura,
    /// Show or toggle mention settings
    Mentions {
        /// Turn mentions on or off for everyone
        #[arg(long)]
        global: Option<bool>,
    },
    Admins,
    /// Check that the API is up
    Health,
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = if debug {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_line_number(debug)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = Config::new();
    if let Some(api_url) = &cli.api_url {
        config.api_base = api_url.clone();
    }
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = Some(data_dir.clone());
    }

    if cli.debug {
        eprintln!(
            "{}",
            format!("[DEBUG] API base: {}", config.api_base()).dimmed()
        );
    }

    let client = BreakerClient::new(&config).context("failed to create API client")?;

    if cli.ephemeral {
        run(cli.command, client, MemoryKeyValueStorage::new()).await
    } else {
        let dir = config.session_dir();
        tracing::debug!("Session directory: {}", dir.display());
        run(cli.command, client, FileKeyValueStorage::new(dir)).await
    }
}

async fn run<S: KeyValueStorage>(
    command: Commands,
    client: BreakerClient,
    storage: S,
) -> anyhow::Result<()> {
    let manager = SessionManager::new(client.clone(), storage);
    manager.restore().await;

    match command {
        Commands::RequestCode { phone } => commands::request_code(&manager, &phone).await,
        Commands::Login { code } => commands::login(&manager, &code).await,
        Commands::Logout => commands::logout(&manager).await,
        Commands::Status => commands::status(&manager).await,
        Commands::Profile {
            custom_name,
            use_custom_name,
            allow_mentions,
            emoji,
            emoji_reaction,
        } => {
            let patch = breaker_core::UserPatch {
                allow_mentions,
                custom_name,
                custom_name_enabled: use_custom_name,
                emoji_reaction,
                emoji,
            };
            commands::profile(&manager, &client, patch).await
        }
        Commands::Ranking {
            sort,
            search,
            limit,
        } => commands::ranking(&client, sort, search.as_deref(), limit).await,
        Commands::Backups => commands::backups(&client, manager.user_id().await.as_deref()).await,
        Commands::RestoreBackup { id } => {
            commands::restore_backup(&client, manager.user_id().await.as_deref(), &id).await
        }
        Commands::SecretSanta { search } => {
            commands::secret_santa(&manager, &client, search.as_deref()).await
        }
        Commands::Aura => {
            commands::aura();
            Ok(())
        }
        Commands::Mentions { global } => {
            commands::mentions(&client, manager.user_id().await.as_deref(), global).await
        }
        Commands::Admins => commands::admins(&client).await,
        Commands::Health => commands::health(&client).await,
    }
}
