//! Display implementations for domain models.
//!
//! These render a single model as markdown without lineup context; wrappers
//! in [`super::collections`] add stage labels and plan markers.

use std::fmt;

use super::datetime::TimeRange;
use crate::models::{Conflict, FestivalMeta, FestivalSet};

impl fmt::Display for FestivalMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (`{}`)", self.name, self.id)?;
        writeln!(f)?;
        if let Some(location) = &self.location {
            writeln!(f, "- **Location**: {location}")?;
        }
        if let Some(dates) = &self.dates {
            writeln!(f, "- **Dates**: {dates}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for FestivalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} **{}**", TimeRange(self), self.band_name)?;
        if !self.genres.is_empty() {
            write!(f, " ({})", self.genres.join(", "))?;
        }
        write!(f, " `{}`", self.id)
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "**{}** ({}) overlaps **{}** ({})",
            self.a.band_name,
            TimeRange(&self.a),
            self.b.band_name,
            TimeRange(&self.b)
        )
    }
}
