//! Core types for water quality measurements.
//!
//! Raw spreadsheet rows enter through [`raw_row::RawRow`], are turned into
//! typed [`record::MeasurementRecord`]s by the [`normalizer`], and are
//! classified for display by [`classifier::classify`].
//!
//! ```rust
//! use wq_core::classifier::{classify, SafetyCategory};
//! use wq_core::normalizer::{normalize, NormalizeOptions};
//! use wq_core::raw_row::RawRow;
//!
//! let row = RawRow::from_pairs([
//!     ("Locatie", "Amstel"),
//!     ("Meetdag", "01-06-2024"),
//!     ("Coordinaten", "52,36, 4,90"),
//!     ("PH", "8,3-8,7"),
//! ]);
//! let record = normalize(&row, &NormalizeOptions::default());
//! assert_eq!(record.ph, Some(8.5));
//! assert_eq!(classify(record.ph), SafetyCategory::Safe);
//! ```

pub mod classifier;
pub mod date_range;
pub mod entry;
pub mod error;
pub mod normalizer;
pub mod parse;
pub mod raw_row;
pub mod record;
