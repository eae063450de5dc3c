use skytrips_core::{
    CabinClass, DateRange, KvStore, Location, PassengerCount, RecentSearch, SearchRequest,
    TripType,
};
use skytrips_store::{Preferences, RecentSearches};
use std::sync::Arc;
use tracing::info;

use crate::passengers::{update_passengers, PassengerField};
use crate::validation::{validate, FormError};

/// External "execute search" hand-off; the sole exit point toward results
/// rendering and navigation.
pub type SearchExecutor = Box<dyn Fn(&SearchRequest) + Send + Sync>;

/// Owns the committed values of the three child inputs, cross-validates on
/// submit, assembles the outbound [`SearchRequest`], and keeps the recency
/// list and reload prefill up to date.
pub struct SearchForm<S: KvStore> {
    origin: Location,
    destination: Location,
    trip_type: TripType,
    dates: DateRange,
    passengers: PassengerCount,
    cabin: CabinClass,
    recents: RecentSearches<S>,
    prefs: Preferences<S>,
    executor: SearchExecutor,
}

impl<S: KvStore> SearchForm<S> {
    /// Build a form over the given store, prefilled from the last committed
    /// airport pair if one was persisted.
    pub fn new(store: Arc<S>, recents_cap: usize, executor: SearchExecutor) -> Self {
        let prefs = Preferences::new(store.clone());
        let (origin, destination) = match prefs.airport_pair() {
            Some(pair) => (pair.origin, pair.destination),
            None => (Location::empty(), Location::empty()),
        };
        Self {
            origin,
            destination,
            trip_type: TripType::OneWay,
            dates: DateRange::empty(),
            passengers: PassengerCount::default(),
            cabin: CabinClass::default(),
            recents: RecentSearches::new(store.clone(), recents_cap),
            prefs,
            executor,
        }
    }

    pub fn origin(&self) -> &Location {
        &self.origin
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub fn dates(&self) -> DateRange {
        self.dates
    }

    pub fn passengers(&self) -> PassengerCount {
        self.passengers
    }

    pub fn cabin(&self) -> CabinClass {
        self.cabin
    }

    /// Code the origin field may not offer for selection.
    pub fn origin_exclude_code(&self) -> Option<String> {
        self.destination
            .is_selected()
            .then(|| self.destination.code.clone())
    }

    /// Code the destination field may not offer for selection.
    pub fn destination_exclude_code(&self) -> Option<String> {
        self.origin.is_selected().then(|| self.origin.code.clone())
    }

    /// Commit (or clear) the origin. A code colliding with the committed
    /// destination is rejected and the field is left untouched.
    pub fn set_origin(&mut self, location: Location) -> Result<(), FormError> {
        if location.is_selected()
            && self.destination.is_selected()
            && location.code == self.destination.code
        {
            return Err(FormError::DuplicateAirport(location.city));
        }
        self.origin = location;
        self.persist_airports();
        Ok(())
    }

    /// Commit (or clear) the destination, mirroring [`Self::set_origin`].
    pub fn set_destination(&mut self, location: Location) -> Result<(), FormError> {
        if location.is_selected()
            && self.origin.is_selected()
            && location.code == self.origin.code
        {
            return Err(FormError::DuplicateAirport(location.city));
        }
        self.destination = location;
        self.persist_airports();
        Ok(())
    }

    pub fn set_trip_type(&mut self, trip_type: TripType) {
        self.trip_type = trip_type;
        if !trip_type.requires_return() {
            self.dates.end = None;
        }
    }

    pub fn set_dates(&mut self, dates: DateRange) {
        self.dates = dates;
    }

    pub fn set_cabin(&mut self, cabin: CabinClass) {
        self.cabin = cabin;
    }

    pub fn adjust_passengers(&mut self, field: PassengerField, delta: i32) {
        self.passengers = update_passengers(field, delta, self.passengers);
    }

    /// Exchange origin and destination. All-or-nothing: with either side
    /// missing, nothing moves and the missing side is reported.
    pub fn swap(&mut self) -> Result<(), FormError> {
        if !self.origin.is_selected() {
            return Err(FormError::SwapMissingOrigin);
        }
        if !self.destination.is_selected() {
            return Err(FormError::SwapMissingDestination);
        }
        std::mem::swap(&mut self.origin, &mut self.destination);
        self.persist_airports();
        Ok(())
    }

    /// Validate, assemble the request, hand it to the executor, and record
    /// it in the recency list.
    pub fn submit(&mut self) -> Result<SearchRequest, FormError> {
        validate(&self.origin, &self.destination, self.trip_type, &self.dates)?;

        let request = SearchRequest::build(
            self.trip_type,
            self.origin.clone(),
            self.destination.clone(),
            self.dates,
            self.passengers,
            self.cabin,
            self.prefs.currency(),
        );

        info!(
            "search accepted: {} -> {} ({:?})",
            request.origin.code, request.destination.code, request.trip_type
        );
        self.recents.record(&request);
        self.persist_airports();
        (self.executor)(&request);
        Ok(request)
    }

    /// Repopulate every field from a recency entry and immediately submit.
    pub fn replay(&mut self, recent: &RecentSearch) -> Result<SearchRequest, FormError> {
        self.origin = recent.origin.clone();
        self.destination = recent.destination.clone();
        self.trip_type = recent.trip_type;
        self.dates = recent.dates;
        self.passengers = recent.passengers;
        self.cabin = recent.cabin;
        self.submit()
    }

    pub fn recent_searches(&self) -> Vec<RecentSearch> {
        self.recents.load()
    }

    fn persist_airports(&self) {
        if self.origin.is_selected() && self.destination.is_selected() {
            self.prefs.save_airport_pair(&self.origin, &self.destination);
        }
    }
}
