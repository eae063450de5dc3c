use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::location::Location;
use crate::passengers::PassengerCount;
use crate::trip::{CabinClass, DateRange, TripType};

/// One origin-destination pair with its travel date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLeg {
    pub origin_code: String,
    pub destination_code: String,
    pub date: NaiveDate,
}

/// The coordinator's finished output, handed to the external search executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub id: Uuid,
    pub trip_type: TripType,
    pub origin: Location,
    pub destination: Location,
    pub dates: DateRange,
    pub passengers: PassengerCount,
    pub cabin: CabinClass,
    pub currency: String,
    pub legs: Vec<SearchLeg>,
    pub created_at: DateTime<Utc>,
}

impl SearchRequest {
    /// Assemble a request from validated form values. Legs are derived: one
    /// for a one-way trip, two mirrored legs for a round trip, each carrying
    /// its own date. Callers must have validated completeness first.
    pub fn build(
        trip_type: TripType,
        origin: Location,
        destination: Location,
        dates: DateRange,
        passengers: PassengerCount,
        cabin: CabinClass,
        currency: String,
    ) -> Self {
        let legs = derive_legs(trip_type, &origin, &destination, &dates);
        Self {
            id: Uuid::new_v4(),
            trip_type,
            origin,
            destination,
            dates,
            passengers,
            cabin,
            currency,
            legs,
            created_at: Utc::now(),
        }
    }
}

fn derive_legs(
    trip_type: TripType,
    origin: &Location,
    destination: &Location,
    dates: &DateRange,
) -> Vec<SearchLeg> {
    let mut legs = Vec::new();
    if let Some(start) = dates.start {
        legs.push(SearchLeg {
            origin_code: origin.code.clone(),
            destination_code: destination.code.clone(),
            date: start,
        });
    }
    if trip_type == TripType::RoundTrip {
        if let Some(end) = dates.end {
            legs.push(SearchLeg {
                origin_code: destination.code.clone(),
                destination_code: origin.code.clone(),
                date: end,
            });
        }
    }
    legs
}

/// Persisted projection of an accepted search, shown as a one-click repeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentSearch {
    pub origin: Location,
    pub destination: Location,
    pub trip_type: TripType,
    pub dates: DateRange,
    pub passengers: PassengerCount,
    pub cabin: CabinClass,
    pub searched_at: DateTime<Utc>,
}

impl RecentSearch {
    pub fn from_request(request: &SearchRequest) -> Self {
        Self {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            trip_type: request.trip_type,
            dates: request.dates,
            passengers: request.passengers,
            cabin: request.cabin,
            searched_at: request.created_at,
        }
    }

    /// Identity tuple for de-duplication. Timestamps are deliberately
    /// excluded: repeating yesterday's search is the same search.
    pub fn dedup_key(
        &self,
    ) -> (
        &str,
        &str,
        TripType,
        Option<NaiveDate>,
        Option<NaiveDate>,
        PassengerCount,
        CabinClass,
    ) {
        (
            &self.origin.code,
            &self.destination.code,
            self.trip_type,
            self.dates.start,
            self.dates.end,
            self.passengers,
            self.cabin,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sydney() -> Location {
        Location::new("SYD", "Sydney Kingsford Smith", "Sydney", "Australia")
    }

    fn kathmandu() -> Location {
        Location::new("KTM", "Tribhuvan Intl", "Kathmandu", "Nepal")
    }

    #[test]
    fn test_one_way_builds_single_leg() {
        let request = SearchRequest::build(
            TripType::OneWay,
            sydney(),
            kathmandu(),
            DateRange::new(Some(date(2026, 9, 1)), None),
            PassengerCount::default(),
            CabinClass::Economy,
            "USD".to_string(),
        );

        assert_eq!(request.legs.len(), 1);
        assert_eq!(request.legs[0].origin_code, "SYD");
        assert_eq!(request.legs[0].destination_code, "KTM");
        assert_eq!(request.legs[0].date, date(2026, 9, 1));
    }

    #[test]
    fn test_round_trip_builds_mirrored_legs() {
        let request = SearchRequest::build(
            TripType::RoundTrip,
            sydney(),
            kathmandu(),
            DateRange::new(Some(date(2026, 9, 1)), Some(date(2026, 9, 10))),
            PassengerCount::default(),
            CabinClass::Economy,
            "USD".to_string(),
        );

        assert_eq!(request.legs.len(), 2);
        assert_eq!(request.legs[0].origin_code, "SYD");
        assert_eq!(request.legs[1].origin_code, "KTM");
        assert_eq!(request.legs[1].destination_code, "SYD");
        assert_eq!(request.legs[1].date, date(2026, 9, 10));
    }

    #[test]
    fn test_dedup_key_ignores_timestamp() {
        let request = SearchRequest::build(
            TripType::OneWay,
            sydney(),
            kathmandu(),
            DateRange::new(Some(date(2026, 9, 1)), None),
            PassengerCount::default(),
            CabinClass::Economy,
            "USD".to_string(),
        );

        let mut a = RecentSearch::from_request(&request);
        let b = RecentSearch::from_request(&request);
        a.searched_at = a.searched_at + chrono::Duration::hours(5);

        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
