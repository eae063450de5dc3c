use skytrips_core::{Location, LocationGroup};
use std::collections::HashMap;

/// Inline error shown inside the field's overlay when the lookup fails.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch locations. Please try again.";

/// Shown when a non-empty query legitimately matches nothing.
pub const NO_RESULTS_MESSAGE: &str = "No locations found";

/// Label rendered on a disabled row whose code is excluded by the paired field.
pub const EXCLUDED_ROW_LABEL: &str = "Already selected for the other field";

/// Lifecycle of a single autocomplete field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// No text, no selection.
    Idle,
    /// Free text entered, debounce pending or elapsed without a query yet.
    Typing,
    /// A lookup is in flight; the overlay shows the loader.
    Loading,
    /// Grouped results (or popular seed, or an error notice) are rendered.
    Results,
    /// A location is committed; the field is read-only.
    Selected,
}

/// Discrete inputs driving the field. Everything the UI layer can do to the
/// field arrives as one of these.
#[derive(Debug, Clone)]
pub enum FieldEvent {
    TextChanged(String),
    DebounceElapsed { generation: u64 },
    LookupSucceeded { generation: u64, groups: Vec<LocationGroup> },
    LookupFailed { generation: u64 },
    RowPressed,
    RowSelected(Location),
    GroupToggled(String),
    FieldFocused,
    OutsideClicked,
    EscapePressed,
    ExcludeChanged(Option<String>),
    /// Externally controlled value, e.g. a reload prefill or a recent-search
    /// replay. Commits (or clears) without emitting a change back out.
    ValueSet(Location),
}

/// Side effects requested by a transition; the async driver executes them.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEffect {
    ScheduleDebounce { generation: u64 },
    IssueLookup { generation: u64, query: String },
    EmitChange(Location),
    MarkPopular { code: String },
    AttachViewportListeners,
    DetachViewportListeners,
}

/// What the overlay body should currently say, besides result rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldNotice {
    LookupFailed(&'static str),
    NoResults(&'static str),
}

/// Complete state of one autocomplete field.
///
/// [`FieldState::apply`] is a total function of (state, event): deterministic,
/// side-effect-free, independent of any rendering technology. Requested side
/// effects come back as [`FieldEffect`] values.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub label: String,
    pub placeholder: String,
    pub phase: FieldPhase,
    pub text: String,
    pub overlay_open: bool,
    pub groups: Vec<LocationGroup>,
    pub selected: Location,
    pub error: Option<&'static str>,
    pub exclude_code: Option<String>,
    /// Monotonic request sequence; stale debounces and lookup completions
    /// are discarded when their generation no longer matches.
    generation: u64,
    /// Expansion toggles keyed by group key; absent means expanded.
    expansion: HashMap<String, bool>,
    /// Set on pointer-down over a row, so the document-level outside-click
    /// handler does not also close the overlay for the click that IS the
    /// selection.
    selecting_row: bool,
    popular: Vec<LocationGroup>,
}

impl FieldState {
    pub fn new(
        label: &str,
        placeholder: &str,
        initial_value: Option<Location>,
        exclude_code: Option<String>,
        popular: Vec<LocationGroup>,
    ) -> Self {
        let mut state = Self {
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            phase: FieldPhase::Idle,
            text: String::new(),
            overlay_open: false,
            groups: Vec::new(),
            selected: Location::empty(),
            error: None,
            exclude_code,
            generation: 0,
            expansion: HashMap::new(),
            selecting_row: false,
            popular,
        };
        if let Some(value) = initial_value {
            if value.is_selected() {
                state.text = value.field_text();
                state.selected = value;
                state.phase = FieldPhase::Selected;
            }
        }
        state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Groups default to expanded; only explicit toggles are stored.
    pub fn is_group_expanded(&self, group_key: &str) -> bool {
        self.expansion.get(group_key).copied().unwrap_or(true)
    }

    /// Excluded rows are rendered disabled, never removed.
    pub fn row_disabled(&self, location: &Location) -> bool {
        self.exclude_code.as_deref() == Some(location.code.as_str())
    }

    /// Explanatory label carried by a disabled row.
    pub fn row_note(&self, location: &Location) -> Option<&'static str> {
        self.row_disabled(location).then_some(EXCLUDED_ROW_LABEL)
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FieldPhase::Loading
    }

    pub fn notice(&self) -> Option<FieldNotice> {
        if self.phase != FieldPhase::Results {
            return None;
        }
        if let Some(message) = self.error {
            return Some(FieldNotice::LookupFailed(message));
        }
        if self.groups.is_empty() && !self.text.trim().is_empty() {
            return Some(FieldNotice::NoResults(NO_RESULTS_MESSAGE));
        }
        None
    }

    /// Advance the state machine by one event.
    pub fn apply(&mut self, event: FieldEvent) -> Vec<FieldEffect> {
        let mut effects = Vec::new();
        match event {
            FieldEvent::TextChanged(text) => {
                // The input is read-only while a selection is committed; a
                // focus/click must clear it first.
                if self.phase == FieldPhase::Selected {
                    return effects;
                }
                self.text = text;
                self.phase = FieldPhase::Typing;
                self.error = None;
                self.generation += 1;
                self.open_overlay(&mut effects);
                effects.push(FieldEffect::ScheduleDebounce {
                    generation: self.generation,
                });
            }
            FieldEvent::DebounceElapsed { generation } => {
                if generation != self.generation || self.phase == FieldPhase::Selected {
                    return effects;
                }
                let query = self.text.trim().to_string();
                if query.is_empty() {
                    self.show_popular();
                } else {
                    self.phase = FieldPhase::Loading;
                    self.open_overlay(&mut effects);
                    effects.push(FieldEffect::IssueLookup { generation, query });
                }
            }
            FieldEvent::LookupSucceeded { generation, groups } => {
                if generation != self.generation || self.phase == FieldPhase::Selected {
                    return effects;
                }
                self.groups = groups;
                self.expansion.clear();
                self.error = None;
                self.phase = FieldPhase::Results;
            }
            FieldEvent::LookupFailed { generation } => {
                if generation != self.generation || self.phase == FieldPhase::Selected {
                    return effects;
                }
                self.groups.clear();
                self.expansion.clear();
                self.error = Some(FETCH_ERROR_MESSAGE);
                self.phase = FieldPhase::Results;
            }
            FieldEvent::RowPressed => {
                self.selecting_row = true;
            }
            FieldEvent::RowSelected(location) => {
                self.selecting_row = false;
                if self.row_disabled(&location) || !location.is_selected() {
                    return effects;
                }
                self.text = location.field_text();
                self.selected = location.clone();
                self.phase = FieldPhase::Selected;
                self.error = None;
                self.generation += 1;
                self.close_overlay(&mut effects);
                effects.push(FieldEffect::EmitChange(location.clone()));
                effects.push(FieldEffect::MarkPopular {
                    code: location.code,
                });
            }
            FieldEvent::GroupToggled(group_key) => {
                let expanded = self.is_group_expanded(&group_key);
                self.expansion.insert(group_key, !expanded);
            }
            FieldEvent::FieldFocused => {
                if self.phase == FieldPhase::Selected {
                    // Re-entering a selected field clears it so the user can
                    // search again.
                    self.selected = Location::empty();
                    self.text.clear();
                    self.phase = FieldPhase::Idle;
                    self.generation += 1;
                    effects.push(FieldEffect::EmitChange(Location::empty()));
                }
                self.open_overlay(&mut effects);
                if self.text.trim().is_empty() {
                    self.show_popular();
                }
            }
            FieldEvent::OutsideClicked => {
                if self.selecting_row {
                    self.selecting_row = false;
                    return effects;
                }
                self.close_overlay(&mut effects);
            }
            FieldEvent::EscapePressed => {
                self.close_overlay(&mut effects);
            }
            FieldEvent::ExcludeChanged(exclude_code) => {
                self.exclude_code = exclude_code;
            }
            FieldEvent::ValueSet(location) => {
                self.generation += 1;
                self.error = None;
                self.selecting_row = false;
                if location.is_selected() {
                    self.text = location.field_text();
                    self.selected = location;
                    self.phase = FieldPhase::Selected;
                } else {
                    self.selected = Location::empty();
                    self.text.clear();
                    self.phase = FieldPhase::Idle;
                }
                self.close_overlay(&mut effects);
            }
        }
        effects
    }

    fn show_popular(&mut self) {
        self.groups = self.popular.clone();
        self.expansion.clear();
        self.error = None;
        self.phase = FieldPhase::Results;
    }

    fn open_overlay(&mut self, effects: &mut Vec<FieldEffect>) {
        if !self.overlay_open {
            self.overlay_open = true;
            effects.push(FieldEffect::AttachViewportListeners);
        }
    }

    fn close_overlay(&mut self, effects: &mut Vec<FieldEffect>) {
        if self.overlay_open {
            self.overlay_open = false;
            effects.push(FieldEffect::DetachViewportListeners);
        }
    }
}
