mod ui;

use card_journal::card::Card;
use card_journal::config::{Cli, Config};
use card_journal::entry_store::EntryStore;
use card_journal::inspiration;
use card_journal::storage::{FileStorage, KeyValueStore};
use card_journal::{JournalEntry, JournalError};
use chrono::{Local, Utc};
use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use log::{error, info, warn};
use std::fs::{self, OpenOptions};
use ui::{Action, CalendarAction, UI};

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::from(Cli::parse());
    init_logging(&config)?;

    let mut store = EntryStore::new(FileStorage::new(&config.data_dir))
        .with_daily_limit(config.one_entry_per_day);
    info!("journal data in {}", store.storage().dir().display());
    let mut ui = UI::new()?;

    loop {
        let entries = load_entries(&store, &mut ui);
        ui.display(&entries)?;

        if let Some(action) = ui.handle_input(&entries)? {
            match action {
                Action::Write => write_today(&mut store, &mut ui)?,
                Action::Calendar => loop {
                    let entries = load_entries(&store, &mut ui);
                    let Some(action) = ui.view_calendar(&entries)? else {
                        break;
                    };
                    let outcome = match action {
                        CalendarAction::ToggleFavorite(id) => {
                            store.toggle_favorite(&id).map(|favorite| {
                                if favorite {
                                    "Added to favorites"
                                } else {
                                    "Removed from favorites"
                                }
                            })
                        }
                        CalendarAction::Delete(id) => store.delete(&id).map(|_| "Entry deleted"),
                    };
                    match outcome {
                        Ok(message) => ui.set_notice(message),
                        Err(e) => report(&mut ui, &e),
                    }
                },
                Action::Search => ui.search_entries(&entries)?,
                Action::Recap => ui.recap(&entries)?,
                Action::Quit => break,
            }
        }
    }

    info!("goodbye");
    Ok(())
}

/// Runs today's card until it is saved or the user backs out.
fn write_today<S: KeyValueStore>(store: &mut EntryStore<S>, ui: &mut UI) -> Result<()> {
    let today = Local::now().date_naive();
    match store.daily_limit_met(today) {
        Ok(true) if store.enforces_daily_limit() => {
            report(ui, &JournalError::DailyLimit { day: today });
            return Ok(());
        }
        Err(e) => {
            report(ui, &e);
            return Ok(());
        }
        _ => {}
    }

    let mut card = Card::for_today(inspiration::random_prompt().to_string());
    while ui.write_card(&mut card)? {
        match card.submit(Utc::now()).and_then(|entry| store.append(entry)) {
            Ok(()) => {
                let motivation = inspiration::random_motivation();
                ui.set_motivation(motivation);
                ui.set_notice("Your journal entry has been saved!");
                card.reset();
                break;
            }
            Err(e) => report(ui, &e),
        }
    }
    Ok(())
}

/// Reads the entry list, turning a failed read into a notice and an empty view.
fn load_entries<S: KeyValueStore>(store: &EntryStore<S>, ui: &mut UI) -> Vec<JournalEntry> {
    match store.get_all() {
        Ok(entries) => entries,
        Err(e) => {
            report(ui, &e);
            Vec::new()
        }
    }
}

fn report(ui: &mut UI, e: &JournalError) {
    match e {
        JournalError::Storage(_) | JournalError::Corrupt(_) => error!("{e}"),
        _ => warn!("{e}"),
    }
    ui.set_notice(e.notice());
}

/// Log records go to a file: the terminal belongs to the UI.
fn init_logging(config: &Config) -> Result<()> {
    fs::create_dir_all(&config.data_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())
        .map_err(|e| eyre!("Failed to open log file {}: {e}", config.log_file().display()))?;

    env_logger::Builder::new()
        .filter_level(config.log_level)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}
