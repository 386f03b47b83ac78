//! Set time display utilities.
//!
//! Lineup times are festival-local wall-clock times, so they are formatted
//! as-is without any timezone conversion.

use std::fmt;

use jiff::civil::DateTime;

use crate::models::FestivalSet;

/// A wrapper around a set time formatting it as a 12-hour clock time, e.g.
/// `4:00 PM`.
pub struct SetTime<'a>(pub &'a DateTime);

impl<'a> fmt::Display for SetTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%-I:%M %p"))
    }
}

/// Start and end of a set, e.g. `4:00 PM - 4:45 PM`.
pub struct TimeRange<'a>(pub &'a FestivalSet);

impl<'a> fmt::Display for TimeRange<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", SetTime(&self.0.start), SetTime(&self.0.end))
    }
}
