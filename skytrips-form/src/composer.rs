use chrono::NaiveDate;
use skytrips_autocomplete::{
    AutocompleteEngine, AutocompleteHandle, FieldConfig, FieldOutput, TimingConfig,
};
use skytrips_calendar::{
    calendar_placement, CalendarEffect, CalendarEvent, CalendarWidths, DateRangePicker,
};
use skytrips_core::{KvStore, Location, LocationLookup, RecentSearch, SearchRequest, TripType};
use skytrips_shared::{OverlayPlacement, PlacementConfig, Rect, Viewport};
use skytrips_store::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::coordinator::{SearchExecutor, SearchForm};
use crate::validation::FormError;

/// The assembled search page: two autocomplete fields, the date range
/// picker, and the coordinating form, wired together.
///
/// Child components report through their output channels; [`SearchPage::pump`]
/// drains those into the coordinator, which is where cross-field rules
/// (airport mutual exclusion) are enforced.
pub struct SearchPage<S: KvStore> {
    form: SearchForm<S>,
    origin_field: AutocompleteHandle,
    origin_outputs: UnboundedReceiver<FieldOutput>,
    destination_field: AutocompleteHandle,
    destination_outputs: UnboundedReceiver<FieldOutput>,
    calendar: DateRangePicker,
    calendar_widths: CalendarWidths,
    placement: PlacementConfig,
    today: NaiveDate,
}

impl<S: KvStore> SearchPage<S> {
    pub fn new(
        store: Arc<S>,
        lookup: Arc<dyn LocationLookup>,
        today: NaiveDate,
        config: &Config,
        executor: SearchExecutor,
    ) -> Self {
        let form = SearchForm::new(store, config.recents.cap, executor);

        let timing = TimingConfig {
            debounce: Duration::from_millis(config.timing.debounce_ms),
            min_loading: Duration::from_millis(config.timing.min_loading_ms),
        };

        let mut origin_config = FieldConfig::new("From", "City or airport");
        origin_config.timing = timing;
        origin_config.placement = config.overlay.clone();
        origin_config.initial_value = form.origin().is_selected().then(|| form.origin().clone());
        origin_config.exclude_code = form.origin_exclude_code();

        let mut destination_config = FieldConfig::new("To", "City or airport");
        destination_config.timing = timing;
        destination_config.placement = config.overlay.clone();
        destination_config.initial_value = form
            .destination()
            .is_selected()
            .then(|| form.destination().clone());
        destination_config.exclude_code = form.destination_exclude_code();

        let (origin_field, origin_outputs) =
            AutocompleteEngine::spawn(origin_config, lookup.clone());
        let (destination_field, destination_outputs) =
            AutocompleteEngine::spawn(destination_config, lookup);

        let calendar = DateRangePicker::new(form.trip_type(), form.dates(), today);

        Self {
            form,
            origin_field,
            origin_outputs,
            destination_field,
            destination_outputs,
            calendar,
            calendar_widths: CalendarWidths {
                one_way: config.calendar.one_way_width,
                round_trip: config.calendar.round_trip_width,
            },
            placement: config.overlay.clone(),
            today,
        }
    }

    pub fn form(&self) -> &SearchForm<S> {
        &self.form
    }

    pub fn origin_field(&self) -> &AutocompleteHandle {
        &self.origin_field
    }

    pub fn origin_field_mut(&mut self) -> &mut AutocompleteHandle {
        &mut self.origin_field
    }

    pub fn destination_field(&self) -> &AutocompleteHandle {
        &self.destination_field
    }

    pub fn destination_field_mut(&mut self) -> &mut AutocompleteHandle {
        &mut self.destination_field
    }

    pub fn calendar(&self) -> &DateRangePicker {
        &self.calendar
    }

    /// Drain pending child-field commits into the coordinator. A commit the
    /// coordinator rejects (airport collision) resets the offending field to
    /// unselected, leaving the paired field untouched; the error is returned
    /// for the notice layer.
    pub fn pump(&mut self) -> Vec<FormError> {
        let mut errors = Vec::new();

        while let Ok(FieldOutput::Changed(location)) = self.origin_outputs.try_recv() {
            if let Err(err) = self.form.set_origin(location) {
                self.origin_field.set_value(Location::empty());
                errors.push(err);
            }
        }
        while let Ok(FieldOutput::Changed(location)) = self.destination_outputs.try_recv() {
            if let Err(err) = self.form.set_destination(location) {
                self.destination_field.set_value(Location::empty());
                errors.push(err);
            }
        }

        self.refresh_exclusions();
        errors
    }

    /// Route an event into the date range picker and apply what it reports
    /// back to the form.
    pub fn calendar_event(&mut self, event: CalendarEvent) {
        for effect in self.calendar.apply(event) {
            match effect {
                CalendarEffect::EmitRange(range) => self.form.set_dates(range),
                CalendarEffect::EmitTripType(trip_type) => self.form.set_trip_type(trip_type),
                CalendarEffect::AttachViewportListeners
                | CalendarEffect::DetachViewportListeners => {}
            }
        }
    }

    pub fn set_trip_type(&mut self, trip_type: TripType) {
        self.calendar_event(CalendarEvent::TripTypeChanged(trip_type));
    }

    /// All-or-nothing origin/destination exchange.
    pub fn swap(&mut self) -> Result<(), FormError> {
        self.form.swap()?;
        self.origin_field.set_value(self.form.origin().clone());
        self.destination_field
            .set_value(self.form.destination().clone());
        self.refresh_exclusions();
        Ok(())
    }

    /// Validate and hand off the finished request.
    pub fn submit(&mut self) -> Result<SearchRequest, FormError> {
        self.form.submit()
    }

    /// Repopulate all three child components from a recency entry and
    /// immediately run the search.
    pub fn replay(&mut self, recent: &RecentSearch) -> Result<SearchRequest, FormError> {
        self.origin_field.set_value(recent.origin.clone());
        self.destination_field.set_value(recent.destination.clone());
        self.calendar = DateRangePicker::new(recent.trip_type, recent.dates, self.today);
        let request = self.form.replay(recent)?;
        self.refresh_exclusions();
        Ok(request)
    }

    /// Placement for the calendar overlay while it is open.
    pub fn calendar_placement_for(
        &self,
        trigger: &Rect,
        viewport: &Viewport,
    ) -> Option<OverlayPlacement> {
        self.calendar.is_open().then(|| {
            calendar_placement(
                trigger,
                viewport,
                self.calendar.trip_type(),
                &self.calendar_widths,
                &self.placement,
            )
        })
    }

    fn refresh_exclusions(&self) {
        self.origin_field
            .set_exclude_code(self.form.origin_exclude_code());
        self.destination_field
            .set_exclude_code(self.form.destination_exclude_code());
    }
}
