//! Mutating commands: adding and deleting measurements.

use chrono::NaiveDate;
use clap::Args;
use log::{info, warn};
use wq_core::entry::NewEntry;
use wq_core::raw_row::{self, RawRow};
use wq_core::record::Metric;
use wq_store::persistence::RecordSource;
use wq_store::session::{Persisted, Session};
use wq_utils::dates::{parse_cli_date, today};

/// Fields of a new measurement. Numeric fields are taken as typed, so a
/// decimal comma or a pH range such as `8,3-8,7` is accepted.
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    #[arg(short, long)]
    pub location: String,

    /// Measurement day (DD-MM-YYYY); defaults to today
    #[arg(short, long, value_parser = parse_cli_date)]
    pub date: Option<NaiveDate>,

    /// Time of day, e.g. 09:15
    #[arg(long)]
    pub time: Option<String>,

    /// Coordinates as "lat, lon"
    #[arg(short, long, conflicts_with_all = ["lat", "lon"])]
    pub coordinates: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    #[arg(long)]
    pub ph: Option<String>,

    /// Accept a pH outside 0-14
    #[arg(long)]
    pub confirm_ph: bool,

    #[arg(long)]
    pub temperature: Option<String>,

    #[arg(long)]
    pub orp: Option<String>,

    #[arg(long)]
    pub ec: Option<String>,

    #[arg(long)]
    pub cf: Option<String>,

    #[arg(long)]
    pub tds: Option<String>,

    #[arg(long)]
    pub humidity: Option<String>,

    #[arg(long)]
    pub outdoor_temperature: Option<String>,

    /// Sun or shade ("zon" / "schaduw")
    #[arg(long)]
    pub exposure: Option<String>,

    #[arg(long)]
    pub sample_point: Option<String>,
}

impl AddArgs {
    /// Lay the arguments out as a spreadsheet row.
    pub fn into_entry(self) -> NewEntry {
        let mut row = RawRow::new();
        row.insert(raw_row::LOCATION, self.location);
        if let Some(date) = self.date {
            row.insert(raw_row::MEASUREMENT_DAY, date);
            row.insert(raw_row::DISPLAY_DATE, date);
        }
        row.insert(raw_row::TIME_OF_DAY, self.time);
        row.insert(raw_row::COORDINATES, self.coordinates);
        row.insert(raw_row::PH, self.ph);
        let metrics = [
            (Metric::Temperature, self.temperature),
            (Metric::Orp, self.orp),
            (Metric::Ec, self.ec),
            (Metric::Cf, self.cf),
            (Metric::Tds, self.tds),
            (Metric::Humidity, self.humidity),
            (Metric::OutdoorTemperature, self.outdoor_temperature),
        ];
        for (metric, value) in metrics {
            row.insert(metric.column(), value);
        }
        row.insert(raw_row::EXPOSURE, self.exposure);
        row.insert(raw_row::SAMPLE_POINT, self.sample_point);
        NewEntry::new(row)
            .with_lat_lon(self.lat, self.lon)
            .with_confirmed_ph(self.confirm_ph)
    }
}

fn report(persisted: &Persisted) {
    if let Persisted::SaveFailed(reason) = persisted {
        warn!("Changes kept for this run only, saving failed: {}", reason);
    }
}

pub fn run_add<S: RecordSource>(session: &mut Session<S>, args: AddArgs) -> anyhow::Result<()> {
    let (ordinal, persisted) = session.submit(args.into_entry(), today())?;
    info!("Added measurement {}", ordinal);
    report(&persisted);
    println!("{}", ordinal);
    Ok(())
}

pub fn run_delete<S: RecordSource>(
    session: &mut Session<S>,
    ordinals: Vec<usize>,
) -> anyhow::Result<()> {
    let (removed, persisted) = session.delete(ordinals);
    info!("Deleted {} measurements", removed);
    report(&persisted);
    println!("{}", removed);
    Ok(())
}
