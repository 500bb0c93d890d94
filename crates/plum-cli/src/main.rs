//! Plum CLI - tagged notes from the terminal, synced between machines.

mod cli;
mod commands;
mod error;
mod settings_file;

#[cfg(test)]
mod tests;

use clap::{CommandFactory, Parser};

use crate::cli::{Cli, Commands};
use crate::commands::add::run_add;
use crate::commands::common::{resolve_notes_path, Context};
use crate::commands::daemon::run_daemon;
use crate::commands::list::run_list;
use crate::commands::remove::run_remove;
use crate::commands::settings::run_settings;
use crate::commands::sync::run_sync;
use crate::commands::update::run_update;
use crate::error::CliError;
use crate::settings_file::resolve_settings_path;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plum=info".parse().expect("valid directive"))
                .add_directive("plum_api=info".parse().expect("valid directive"))
                .add_directive("plum_core=warn".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(CliError::Io)?;
        println!();
        return Ok(());
    };

    let context = Context {
        notes_path: resolve_notes_path(cli.notes_path)?,
        settings_path: resolve_settings_path(cli.settings_path)?,
    };

    match command {
        Commands::Add { kind, tags, text } => {
            run_add(&kind, tags.as_deref(), &text, &context).await?;
        }
        Commands::List { json, clauses } => run_list(&clauses, json, &context).await?,
        Commands::Update {
            id,
            kind,
            tags,
            text,
        } => {
            run_update(
                &id,
                kind.as_deref(),
                tags.as_deref(),
                text.as_deref(),
                &context,
            )
            .await?;
        }
        Commands::Remove { id } => run_remove(&id, &context).await?,
        Commands::Settings { key, value } => {
            run_settings(key.as_deref(), value.as_deref(), &context)?;
        }
        Commands::Daemon { port } => run_daemon(port, &context).await?,
        Commands::Sync { address } => run_sync(address.as_deref(), &context).await?,
    }

    Ok(())
}
