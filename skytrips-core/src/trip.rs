use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Governs whether a return date is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripType {
    OneWay,
    RoundTrip,
    /// Representable but rejected at submit; there is no leg-list UI behind it.
    MultiCity,
}

impl TripType {
    pub fn requires_return(&self) -> bool {
        matches!(self, TripType::RoundTrip)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl Default for CabinClass {
    fn default() -> Self {
        CabinClass::Economy
    }
}

/// Selected travel dates. One-way trips keep `end` at `None`; a committed
/// round trip has `end >= start`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether the range satisfies the completeness requirement of `trip_type`.
    pub fn is_complete_for(&self, trip_type: TripType) -> bool {
        match trip_type {
            TripType::RoundTrip => self.start.is_some() && self.end.is_some(),
            TripType::OneWay | TripType::MultiCity => self.start.is_some(),
        }
    }

    /// A committed range is ordered; same-day round trips are valid.
    pub fn is_ordered(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end >= start,
            _ => true,
        }
    }
}
