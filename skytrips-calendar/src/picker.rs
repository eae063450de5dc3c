use chrono::NaiveDate;
use skytrips_core::{DateRange, TripType};

use crate::day::{day_cell, DayCell};

/// Where the calendar overlay currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarPhase {
    Closed,
    /// Open with a single date to pick.
    OpenOneWay,
    /// Open in round-trip mode, next pick starts a range.
    SelectingStart,
    /// Open in round-trip mode, next pick completes the range.
    SelectingEnd,
}

#[derive(Debug, Clone)]
pub enum CalendarEvent {
    Opened,
    TripTypeChanged(TripType),
    DayPicked(NaiveDate),
    Cleared,
    Applied,
    EscapePressed,
    OutsideClicked,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarEffect {
    EmitRange(DateRange),
    EmitTripType(TripType),
    AttachViewportListeners,
    DetachViewportListeners,
}

/// Trip-type-aware date range selection.
///
/// `actively_selecting` distinguishes a fresh user-driven pick (which
/// disables dates before the chosen start while picking the end) from a
/// reopened view of a committed range (which disables nothing, so the prior
/// selection stays fully visible and editable).
#[derive(Debug, Clone)]
pub struct DateRangePicker {
    trip_type: TripType,
    range: DateRange,
    phase: CalendarPhase,
    actively_selecting: bool,
    today: NaiveDate,
}

impl DateRangePicker {
    pub fn new(trip_type: TripType, initial: DateRange, today: NaiveDate) -> Self {
        Self {
            trip_type,
            range: initial,
            phase: CalendarPhase::Closed,
            actively_selecting: false,
            today,
        }
    }

    pub fn phase(&self) -> CalendarPhase {
        self.phase
    }

    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn is_open(&self) -> bool {
        self.phase != CalendarPhase::Closed
    }

    /// Whether the Apply action is enabled: a start date suffices for
    /// one-way, a round trip needs the full range.
    pub fn can_apply(&self) -> bool {
        self.range.is_complete_for(self.trip_type)
    }

    /// Cell styling/eligibility for one date under the current state.
    pub fn day_cell_for(&self, date: NaiveDate) -> DayCell {
        day_cell(
            date,
            self.today,
            self.range.start,
            self.range.end,
            self.actively_selecting,
        )
    }

    /// Advance the state machine by one event.
    pub fn apply(&mut self, event: CalendarEvent) -> Vec<CalendarEffect> {
        let mut effects = Vec::new();
        match event {
            CalendarEvent::Opened => {
                // A reopen shows history, it is not a fresh pick.
                self.actively_selecting = false;
                self.open(&mut effects);
            }
            CalendarEvent::TripTypeChanged(trip_type) => {
                if trip_type == self.trip_type {
                    return effects;
                }
                self.trip_type = trip_type;
                effects.push(CalendarEffect::EmitTripType(trip_type));
                match trip_type {
                    TripType::RoundTrip => {
                        if self.range.start.is_some() {
                            // The user already has a departure date; assume
                            // they now want the return and open straight into
                            // end selection.
                            self.actively_selecting = false;
                            self.open(&mut effects);
                            self.phase = CalendarPhase::SelectingEnd;
                        } else if self.is_open() {
                            self.phase = CalendarPhase::SelectingStart;
                        }
                    }
                    TripType::OneWay | TripType::MultiCity => {
                        if self.range.end.is_some() {
                            self.range.end = None;
                            effects.push(CalendarEffect::EmitRange(self.range));
                        }
                        // Overlay state is deliberately left as-is.
                        if self.is_open() {
                            self.phase = CalendarPhase::OpenOneWay;
                        }
                    }
                }
            }
            CalendarEvent::DayPicked(date) => {
                if !self.is_open() || self.day_cell_for(date).disabled {
                    return effects;
                }
                self.pick(date, &mut effects);
            }
            CalendarEvent::Cleared => {
                self.range = DateRange::empty();
                self.actively_selecting = false;
                if self.is_open() {
                    self.phase = self.open_phase();
                }
                effects.push(CalendarEffect::EmitRange(self.range));
            }
            CalendarEvent::Applied => {
                if self.can_apply() {
                    self.close(&mut effects);
                }
            }
            CalendarEvent::EscapePressed | CalendarEvent::OutsideClicked => {
                self.close(&mut effects);
            }
        }
        effects
    }

    fn pick(&mut self, date: NaiveDate, effects: &mut Vec<CalendarEffect>) {
        match self.phase {
            CalendarPhase::OpenOneWay => {
                self.range = DateRange::new(Some(date), None);
                effects.push(CalendarEffect::EmitRange(self.range));
            }
            CalendarPhase::SelectingStart => {
                self.range = DateRange::new(Some(date), None);
                self.actively_selecting = true;
                self.phase = CalendarPhase::SelectingEnd;
                effects.push(CalendarEffect::EmitRange(self.range));
            }
            CalendarPhase::SelectingEnd => {
                match self.range.start {
                    Some(start) if date >= start => {
                        self.range.end = Some(date);
                        self.actively_selecting = false;
                        self.phase = CalendarPhase::SelectingStart;
                        effects.push(CalendarEffect::EmitRange(self.range));
                    }
                    _ => {
                        // Reachable only on a reopened view (nothing is
                        // disabled there): an earlier date restarts the range.
                        self.range = DateRange::new(Some(date), None);
                        self.actively_selecting = true;
                        effects.push(CalendarEffect::EmitRange(self.range));
                    }
                }
            }
            CalendarPhase::Closed => {}
        }
    }

    fn open_phase(&self) -> CalendarPhase {
        match self.trip_type {
            TripType::OneWay | TripType::MultiCity => CalendarPhase::OpenOneWay,
            TripType::RoundTrip => {
                if self.range.start.is_some() && self.range.end.is_none() {
                    CalendarPhase::SelectingEnd
                } else {
                    CalendarPhase::SelectingStart
                }
            }
        }
    }

    fn open(&mut self, effects: &mut Vec<CalendarEffect>) {
        if !self.is_open() {
            effects.push(CalendarEffect::AttachViewportListeners);
        }
        self.phase = self.open_phase();
    }

    fn close(&mut self, effects: &mut Vec<CalendarEffect>) {
        if self.is_open() {
            self.phase = CalendarPhase::Closed;
            effects.push(CalendarEffect::DetachViewportListeners);
        }
    }
}
