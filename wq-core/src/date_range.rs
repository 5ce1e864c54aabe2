use crate::error::ValidationError;
use chrono::{NaiveDate, TimeDelta};
use std::mem::replace;

/// An inclusive, validated date range. `start <= end` always holds.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting a start date after the end date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering one day.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day in the range, start and end included.
    pub fn days(&self) -> Days {
        Days(self.start, self.end)
    }
}

/// Day-by-day iterator over a [`DateRange`].
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct Days(NaiveDate, NaiveDate);

impl Iterator for Days {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + TimeDelta::days(1);
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}
