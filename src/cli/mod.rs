mod status_spinner;
mod upload;
mod delete;

use thiserror::Error;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use log::{LevelFilter, error};
use indicatif_log_bridge::LogWrapper;
use console::style;
use indicatif::MultiProgress;
use std::{io::stdout, path::PathBuf, process::ExitCode};
use crate::{credentials::{self, CredentialsError}, http_client::{ApiContext, HttpClient, HttpClientError}};
use status_spinner::StatusSpinner;

/// prefix.dev command-line interface
#[derive(Parser, Debug)]
#[command(version, about, long_about = "prefix.dev command-line interface: uploads package files to a channel on a prefix.dev repository and deletes packages from it.", name = "prefix")]
struct Args {
    /// Bearer token, or path to a JSON credentials file keyed by host
    #[arg(short = 'k', long, default_value = "~/.mamba/auth/authentication.json")]
    token: String,

    /// Repository host
    #[arg(short, long, default_value = "repo.prefix.dev")]
    repo: String,

    /// Target channel
    #[arg(short, long, default_value = "vidlg")]
    channel: String,

    /// Maximum logging level
    #[arg(short, long)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload package files to the channel
    Upload {
        /// Local package files, uploaded in the given order
        #[arg(required = true)]
        pkgs: Vec<PathBuf>
    },
    /// Delete packages from the channel
    Delete {
        /// Package paths ending in <subdir>/<name>
        #[arg(required = true)]
        pkgs: Vec<PathBuf>
    },
    /// Generate shell completion files
    Completion {
        shell: Shell
    },
    /// Test connection to the repository host
    Ping
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Credentials error: {0}")]
    CredentialsError(#[from] CredentialsError),
    #[error("API error: {0}")]
    ApiError(#[from] HttpClientError),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error)
}

type Result<T = ()> = std::result::Result<T, CliError>;

fn setup_logging() -> (MultiProgress, Args) {
    let mut logger = env_logger::Builder::from_default_env();
    let args = Args::parse();

    if let Some(level) = args.log_level {
        logger.filter_level(level);
    }

    let multi = MultiProgress::new();
    let logger = logger.build();
    let log_filter = logger.filter();
    LogWrapper::new(multi.clone(), logger)
        .try_init()
        .unwrap();
    log::set_max_level(log_filter);

    (multi, args)
}

async fn run_internal(multi: MultiProgress, args: Args) -> Result {
    // token, host, and channel are fixed here for the whole invocation
    let token = credentials::resolve_token(&args.token, &args.repo).await?;
    let client = HttpClient::init(ApiContext {
        host: args.repo,
        channel: args.channel,
        token
    });

    match args.command {
        Command::Ping => {
            let status = StatusSpinner::new("Loading...", &multi);
            if let Some(ping) = client.ping().await? {
                status.finish("Repository host is online", true);
                // print the ping
                println!(
                    "{} {} {}",
                    style("⧗").bold().cyan().bright(),
                    style("Ping:").dim().cyan(),
                    style(format!("{}ms", ping)).bold().cyan().bright()
                );
            } else {
                status.finish("Cannot connect to repository host", false);
            }
        },
        Command::Completion { shell } => {
            let mut command = Args::command();
            let name = command.get_name().to_string();
            generate(shell, &mut command, name, &mut stdout());
        },
        Command::Upload { pkgs } => upload::handle(pkgs, &client, &multi).await?,
        Command::Delete { pkgs } => delete::handle(pkgs, &client, &multi).await?
    }

    Ok(())
}

pub async fn run() -> ExitCode {
    let (multi, args) = setup_logging();
    if let Err(err) = run_internal(multi, args).await {
        error!("Unexpected error: {}", err);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
