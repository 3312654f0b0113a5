//! Command-line surface for the Rowdeck table.
//!
//! # Responsibility
//! - Map subcommands onto table use-cases against one SQLite file.
//! - Report failures on stderr with a non-zero exit code.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rowdeck_core::db::open_db;
use rowdeck_core::{
    init_logging, FieldKey, KvRowRepository, SqliteKeyValueStore, TableConfig, TableService,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rowdeck: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("rowdeck: logging disabled: {err}");
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("opening `{}`", config.db_path.display()))?;
    let store = SqliteKeyValueStore::try_new(&conn)?;
    let repo = KvRowRepository::with_key(store, config.storage_key.as_str());
    let mut service = TableService::new(repo);

    match cli.command {
        Command::Render => print!("{}", service.render()?.to_html()),
        Command::List => {
            for (index, row) in service.rows()?.iter().enumerate() {
                let cells = FieldKey::ALL
                    .iter()
                    .map(|key| row.field(*key))
                    .collect::<Vec<_>>()
                    .join(" | ");
                println!("{index}  {}  {cells}", row.id);
            }
        }
        Command::Add => {
            let id = service.add_row()?;
            println!("{id}");
        }
        Command::Delete { id } => service.delete_row(id)?,
        Command::DeleteAt { index } => service.delete_row_at(&index)?,
        Command::Edit { id, field, text } => {
            service.render()?;
            service.edit_cell(id, field.into(), text)?;
            let ack = service.save()?;
            println!("{}", ack.message);
        }
        Command::Export { format, out } => {
            let file = service.export(format.into())?;
            match out {
                Some(dir) => println!("{}", file.write_to(dir)?.display()),
                None => println!("{}", file.content),
            }
        }
        Command::Clear => service.clear()?,
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> TableConfig {
    let mut config = TableConfig::from_env();
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(key) = &cli.storage_key {
        config.storage_key = key.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = dir.clone();
    }
    config
}
