//! Command implementations for the water quality CLI.
//!
//! Every subcommand opens the measurement file given with `--data`, works on
//! the normalised records and writes mutations straight back.

use chrono::NaiveDate;
use clap::Subcommand;
use std::path::{Path, PathBuf};
use wq_core::normalizer::NormalizeOptions;
use wq_store::cache::RecordCache;
use wq_store::models::PopupField;
use wq_store::persistence::CsvFile;
use wq_store::session::Session;
use wq_utils::dates::parse_cli_date;

pub mod edit;
pub mod view;

/// Measurement file used when `--data` is not given.
pub const DEFAULT_DATA_FILE: &str = "Waterkwaliteit.csv";

#[derive(Subcommand)]
pub enum Command {
    /// List measurements, optionally within a date range
    List {
        /// First day to include (DD-MM-YYYY)
        #[arg(long, value_parser = parse_cli_date)]
        from: Option<NaiveDate>,

        /// Last day to include (DD-MM-YYYY)
        #[arg(long, value_parser = parse_cli_date)]
        to: Option<NaiveDate>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the map markers of one day as JSON
    Map {
        /// Day to show; defaults to the earliest measurement date
        #[arg(short, long, value_parser = parse_cli_date)]
        date: Option<NaiveDate>,

        /// Popup fields, comma separated
        #[arg(short, long, value_delimiter = ',', default_value = "PH,Temperatuur")]
        fields: Vec<PopupField>,
    },

    /// Add a measurement
    Add(edit::AddArgs),

    /// Delete measurements by ordinal (as shown by `list`)
    Delete {
        #[arg(required = true)]
        ordinals: Vec<usize>,
    },

    /// Export measurements within a date range as CSV
    Export {
        #[arg(long, value_parser = parse_cli_date)]
        from: NaiveDate,

        #[arg(long, value_parser = parse_cli_date)]
        to: NaiveDate,

        /// Output path; defaults to waterkwaliteit_<from>_tot_<to>.csv
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Count measurements per day within a date range
    Days {
        #[arg(long, value_parser = parse_cli_date)]
        from: NaiveDate,

        #[arg(long, value_parser = parse_cli_date)]
        to: NaiveDate,
    },
}

/// Open the measurement file at `data` as a session.
pub fn open_session(data: &Path) -> anyhow::Result<Session<CsvFile>> {
    let cache = RecordCache::new(CsvFile::new(data), NormalizeOptions::default());
    Session::open(cache)
}

pub fn run(command: Command, data: &Path) -> anyhow::Result<()> {
    let mut session = open_session(data)?;
    match command {
        Command::List { from, to, json } => view::run_list(session.store(), from, to, json),
        Command::Map { date, fields } => view::run_map(session.store(), date, &fields),
        Command::Add(args) => edit::run_add(&mut session, args),
        Command::Delete { ordinals } => edit::run_delete(&mut session, ordinals),
        Command::Export { from, to, out } => view::run_export(session.store(), from, to, out),
        Command::Days { from, to } => view::run_days(session.store(), from, to),
    }
}
