//! Field parsers: one raw cell in, one typed value out.
//!
//! Parsers never fail. A cell that cannot be read yields `None`, which the
//! normaliser stores as an absent field.

pub mod coordinates;
pub mod date;
pub mod number;
pub mod ph;

pub use coordinates::parse_coordinates;
pub use date::parse_date;
pub use number::{parse_decimal, parse_number};
pub use ph::parse_ph;
