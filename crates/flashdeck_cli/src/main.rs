//! Command-line host for the Flashdeck core.
//!
//! # Responsibility
//! - Boot one session against a SQLite store, apply one command, print.
//! - Keep output line-oriented for scripting.

mod args;

use args::{Cli, Command};
use clap::Parser;
use flashdeck_core::scheduler::format_interval;
use flashdeck_core::{
    bootstrap, default_log_level, init_logging, Card, CardId, KeyValueStore, Msg, Session,
    SqliteStore, SystemClock, STORAGE_KEY,
};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let store = SqliteStore::open(&cli.db)
        .map_err(|err| format!("cannot open `{}`: {err}", cli.db.display()))?;
    let store = Arc::new(store);

    match cli.command {
        Command::Export => {
            let stored = store
                .get_item(STORAGE_KEY)
                .map_err(|err| err.to_string())?;
            println!("{}", stored.unwrap_or_default());
            return Ok(());
        }
        Command::Wipe => {
            let removed = store
                .remove_item(STORAGE_KEY)
                .map_err(|err| err.to_string())?;
            println!("{}", if removed { "wiped" } else { "nothing stored" });
            return Ok(());
        }
        _ => {}
    }

    let mut session = bootstrap(Arc::clone(&store), &SystemClock);
    match cli.command {
        Command::List { tag } => {
            dispatch(&mut session, Msg::SetTagFilter { tag })?;
            let shown: Vec<&Card> = session.model().visible_cards().collect();
            print_cards(&shown);
        }
        Command::Due => {
            let model = session.model();
            let due: Vec<&Card> = model.cards.due_cards(model.now_ms).collect();
            print_cards(&due);
        }
        Command::Add { front, back, tags } => {
            dispatch(&mut session, Msg::AddCard { front, back, tags })?;
            if let Some(id) = session.model().ui.selected {
                println!("{id}");
            }
        }
        Command::Edit {
            id,
            front,
            back,
            tags,
        } => {
            let id = parse_id(&id)?;
            dispatch(
                &mut session,
                Msg::EditCard {
                    id,
                    front,
                    back,
                    tags,
                },
            )?;
        }
        Command::Remove { id } => {
            let id = parse_id(&id)?;
            dispatch(&mut session, Msg::RemoveCard { id })?;
        }
        Command::Move { id, index } => {
            let id = parse_id(&id)?;
            dispatch(
                &mut session,
                Msg::MoveCard {
                    id,
                    to_index: index,
                },
            )?;
        }
        Command::Review { id, grade } => {
            let id = parse_id(&id)?;
            dispatch(&mut session, Msg::ReviewCard { id, grade })?;
            if let Some(card) = session.model().cards.get(id) {
                println!("next review in {}", format_interval(card.interval_days));
            }
        }
        Command::ResetProgress { id } => {
            let id = parse_id(&id)?;
            dispatch(&mut session, Msg::ResetProgress { id })?;
        }
        Command::Export | Command::Wipe => {}
    }

    if session.write_failures() > 0 {
        return Err("changes could not be saved".to_string());
    }
    Ok(())
}

fn dispatch(session: &mut Session<SqliteStore>, msg: Msg) -> Result<(), String> {
    session
        .dispatch(msg)
        .map(|_| ())
        .map_err(|err| err.to_string())
}

fn parse_id(value: &str) -> Result<CardId, String> {
    CardId::parse_str(value.trim()).map_err(|_| format!("invalid card id `{value}`"))
}

fn print_cards(cards: &[&Card]) {
    for card in cards {
        let tags = if card.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", card.tags.join(", "))
        };
        println!(
            "{}\t{}\t{}{}",
            card.id,
            card.front.replace('\n', " "),
            card.back.replace('\n', " "),
            tags
        );
    }
}
