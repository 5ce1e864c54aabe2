use chrono::NaiveDate;
use std::path::PathBuf;
use wq_core::classifier::SafetyCategory;
use wq_core::entry::NewEntry;
use wq_core::normalizer::NormalizeOptions;
use wq_core::raw_row::RawRow;
use wq_core::record::Coordinates;
use wq_store::cache::RecordCache;
use wq_store::models::PopupField;
use wq_store::persistence::CsvFile;
use wq_store::session::{Persisted, Session};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fixtures/waterkwaliteit.csv")
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn open(path: PathBuf) -> Session<CsvFile> {
    let cache = RecordCache::new(CsvFile::new(path), NormalizeOptions::with_default_year(2024));
    Session::open(cache).unwrap()
}

#[test]
fn fixture_loads_leniently() {
    let session = open(fixture());
    let store = session.store();
    assert_eq!(store.len(), 5);

    let amstel = store.get(0).unwrap();
    assert_eq!(amstel.coordinates, Some(Coordinates::new(52.3633, 4.9021)));
    assert_eq!(amstel.ph, Some(7.4));

    let sloterplas = store.get(1).unwrap();
    assert_eq!(sloterplas.measurement_date, Some(ymd(2024, 6, 12)));
    assert_eq!(sloterplas.ph, Some(8.5));

    let kanaal = store.get(2).unwrap();
    assert_eq!(kanaal.measurement_date, Some(ymd(2024, 6, 12)));
    assert_eq!(kanaal.coordinates, None);

    assert_eq!(store.get(3).unwrap().coordinates, Some(Coordinates::new(52.3812, 4.9003)));
    let vondelpark = store.get(4).unwrap();
    assert_eq!(vondelpark.measurement_day, Some(ymd(2024, 6, 12)));
    assert_eq!(vondelpark.measurement_date, None);
}

#[test]
fn malformed_coordinates_are_listed_but_not_mapped() {
    let session = open(fixture());
    let store = session.store();
    let day = ymd(2024, 6, 12);

    let markers = store.map_markers(day, &PopupField::DEFAULT_SELECTION);
    let ordinals: Vec<usize> = markers.iter().map(|m| m.ordinal).collect();
    assert_eq!(ordinals, vec![0, 1]);
    assert_eq!(markers[1].category, SafetyCategory::Safe);

    let listed: Vec<usize> = store.filter_by_date(day).iter().map(|(i, _)| *i).collect();
    assert_eq!(listed, vec![0, 1, 2]);
}

#[test]
fn mutations_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Waterkwaliteit.csv");
    std::fs::copy(fixture(), &path).unwrap();

    let mut session = open(path.clone());
    let entry = NewEntry::new(RawRow::from_pairs([("Locatie", "Nieuwe Meer"), ("PH", "7,8")]))
        .with_lat_lon(Some(52.33), Some(4.79));
    let (ordinal, persisted) = session.submit(entry, ymd(2024, 6, 14)).unwrap();
    assert_eq!(ordinal, 5);
    assert_eq!(persisted, Persisted::Saved);

    let (removed, persisted) = session.delete([2, 0]);
    assert_eq!(removed, 2);
    assert_eq!(persisted, Persisted::Saved);
    let expected = session.store().clone();

    let reopened = open(path.clone());
    assert_eq!(reopened.store(), &expected);
    assert_eq!(reopened.store().len(), 4);
    assert_eq!(
        reopened.store().get(3).unwrap().measurement_date,
        Some(ymd(2024, 6, 14))
    );
    let vondelpark = reopened.store().get(2).unwrap();
    assert_eq!(vondelpark.measurement_day, Some(ymd(2024, 6, 12)));
    assert_eq!(vondelpark.measurement_date, None);

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.starts_with("Locatie;Meetdag;Datum;"));
}

#[test]
fn missing_file_opens_empty_and_is_created_on_first_submit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Waterkwaliteit.csv");
    let mut session = open(path.clone());
    assert!(session.store().is_empty());

    let entry = NewEntry::new(RawRow::from_pairs([
        ("Locatie", "Amstel"),
        ("Coordinaten", "52.36, 4.90"),
    ]));
    session.submit(entry, ymd(2024, 6, 14)).unwrap();
    assert!(path.exists());
    assert_eq!(open(path).store().len(), 1);
}
