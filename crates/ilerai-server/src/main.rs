use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ilerai_server::{Overrides, Runtime, logging};

mod commands;

#[derive(Parser)]
#[command(name = "ilerai")]
#[command(about = "IlerAI PHC - USSD access to primary healthcare centers", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep config, sessions, directory and logs under this directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP endpoint the USSD gateway calls
    Serve {
        /// Socket address to listen on, e.g. 0.0.0.0:3000
        #[arg(long)]
        bind: Option<String>,
    },
    /// Simulate a dial-in from the terminal
    Dial {
        /// Caller phone number
        #[arg(long, default_value = "+2348000000000")]
        phone: String,

        /// Reuse an existing session id
        #[arg(long)]
        session_id: Option<String>,

        /// Keystrokes after the dial, e.g. `3 2`
        keys: Vec<String>,
    },
    /// Inspect or clean up stored sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },
    /// Print the service metadata
    Info,
}

#[derive(Subcommand)]
enum SessionsAction {
    /// List stored sessions, most recent first
    List,
    /// Delete sessions idle for longer than the given age
    Prune {
        #[arg(long, default_value_t = 30)]
        older_than_minutes: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let bind_addr = match &cli.command {
        Commands::Serve { bind } => bind.clone(),
        _ => None,
    };
    let overrides = Overrides {
        config_file: cli.config,
        data_dir: cli.data_dir,
        bind_addr,
    };

    match cli.command {
        Commands::Serve { .. } => {
            let (_, paths) = ilerai_server::bootstrap::load_config(&overrides)?;
            let _log_guard = logging::init(Some(&paths.logs_dir()?))?;
            let runtime = Runtime::build(overrides).await?;
            commands::serve::run(runtime).await?;
        }
        Commands::Dial {
            phone,
            session_id,
            keys,
        } => {
            let _log_guard = logging::init(None)?;
            let runtime = Runtime::build(overrides).await?;
            commands::dial::run(&runtime, &phone, session_id, &keys).await?;
        }
        Commands::Sessions { action } => {
            let _log_guard = logging::init(None)?;
            let runtime = Runtime::build(overrides).await?;
            match action {
                SessionsAction::List => commands::sessions::list(&runtime).await?,
                SessionsAction::Prune { older_than_minutes } => {
                    commands::sessions::prune(&runtime, older_than_minutes).await?
                }
            }
        }
        Commands::Info => {
            let _log_guard = logging::init(None)?;
            let runtime = Runtime::build(overrides).await?;
            commands::info::print(&runtime)?;
        }
    }

    Ok(())
}
