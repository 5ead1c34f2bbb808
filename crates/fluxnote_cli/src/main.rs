//! FluxNote command-line front end.
//!
//! # Responsibility
//! - Drive the core note intents from a terminal.
//! - Keep stdout machine-friendly; diagnostics go to stderr logs.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use fluxnote_core::config::LOG_LEVEL_ENV;
use fluxnote_core::{
    init_stderr_logging, open_notes, CoreConfig, NewNote, NoteId, NotePatch, NoteRepository,
};
use log::debug;

/// Stderr level when neither the flag nor the environment sets one.
const DEFAULT_CLI_LOG_LEVEL: &str = "warn";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CoreConfig::from_lookup(|key| {
        std::env::var(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .or_else(|| (key == LOG_LEVEL_ENV).then(|| DEFAULT_CLI_LOG_LEVEL.to_string()))
    });
    if let Some(path) = cli.db.clone() {
        config.db_path = path;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    init_stderr_logging(&config.log_level).context("failed to initialize logging")?;

    debug!(
        "event=cli_start module=cli status=start db_path={}",
        config.db_path.display()
    );
    run(cli.command, &config)
}

fn run(command: Commands, config: &CoreConfig) -> Result<()> {
    if let Commands::Probe = command {
        println!("fluxnote_core ping={}", fluxnote_core::ping());
        println!("fluxnote_core version={}", fluxnote_core::core_version());
        return Ok(());
    }

    let mut service = open_notes(config)
        .with_context(|| format!("cannot open notes at {}", config.db_path.display()))?;

    match command {
        Commands::List { json } => {
            service.load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(service.state())?);
            } else {
                for note in &service.state().notes {
                    println!("{}\t{}\t{}", note.id, note.updated_at, note.title);
                }
            }
        }
        Commands::Show { id } => {
            let id = NoteId::from(id);
            match service.repository().get_note_by_id(&id)? {
                Some(note) => println!("{}", serde_json::to_string_pretty(&note)?),
                None => bail!("note not found: {id}"),
            }
        }
        Commands::Add { title, content } => {
            let note = service.create(NewNote { title, content })?;
            println!("{}", note.id);
        }
        Commands::Edit {
            id,
            title,
            content,
            language,
            collaborators,
            no_collaborators,
        } => {
            let collaborators = if no_collaborators {
                Some(Vec::new())
            } else if collaborators.is_empty() {
                None
            } else {
                Some(collaborators)
            };
            let patch = NotePatch {
                title,
                content,
                language,
                collaborators,
            };
            let update = service.update(NoteId::from(id), patch)?;
            println!("{}\t{}", update.id, update.updated_at);
        }
        Commands::Rm { id } => {
            let id = service.delete(NoteId::from(id))?;
            println!("{id}");
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to delete every note without --yes");
            }
            let removed = service.clear_storage()?;
            println!("removed {removed}");
        }
        Commands::Probe => {}
    }
    Ok(())
}
