use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "card-journal",
    about = "Daily prompt cards for journaling in the terminal",
    version
)]
pub struct Cli {
    /// Directory holding the journal entries and the log file.
    #[arg(long, env = "CARD_JOURNAL_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Allow more than one entry on the same day.
    #[arg(long)]
    pub allow_multiple_per_day: bool,

    /// Log level written to the log file (off, error, warn, info, debug, trace).
    #[arg(long, env = "CARD_JOURNAL_LOG", default_value = "info")]
    pub log_level: LevelFilter,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub one_entry_per_day: bool,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("card-journal.log")
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
        Config {
            data_dir,
            one_entry_per_day: !cli.allow_multiple_per_day,
            log_level: cli.log_level,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("card-journal"))
        .unwrap_or_else(|| PathBuf::from(".card-journal"))
}
