mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, import, imports, links, matches, records, Context};
use crate::error::{exit_code_for, report_error};
use matchday_config as config;
use matchday_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "matchday", version, about = "matchday CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Read a schedule and replace the stored records
    #[command(subcommand)]
    Import(import::ImportCommand),
    List(records::ListArgs),
    Matches(matches::MatchesArgs),
    Confirm(records::RecordIdArgs),
    Unconfirm(records::RecordIdArgs),
    Toggle(records::RecordIdArgs),
    /// WhatsApp links for one record
    Links(links::LinksArgs),
    #[command(name = "mark-sent")]
    MarkSent(links::MarkSentArgs),
    /// Ingestion history
    Imports(imports::ImportsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path.clone()) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;

            if verbose {
                debug!(path = %db_path.display(), "database path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
            };

            match command {
                Command::Import(cmd) => match cmd {
                    import::ImportCommand::File(args) => import::import_file(&ctx, args),
                    import::ImportCommand::Url(args) => import::import_url(&ctx, args),
                    import::ImportCommand::Drive(args) => import::import_drive(&ctx, args),
                },
                Command::List(args) => records::list_records(&ctx, args),
                Command::Matches(args) => matches::list_matches(&ctx, args),
                Command::Confirm(args) => records::set_confirmed(&ctx, args, true),
                Command::Unconfirm(args) => records::set_confirmed(&ctx, args, false),
                Command::Toggle(args) => records::toggle_confirmed(&ctx, args),
                Command::Links(args) => links::show_links(&ctx, args),
                Command::MarkSent(args) => links::mark_sent(&ctx, args),
                Command::Imports(args) => imports::list_imports(&ctx, args),
                Command::Completions(_) => {
                    unreachable!("completions command handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
