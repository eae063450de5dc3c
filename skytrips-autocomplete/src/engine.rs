use crate::popular::popular_locations;
use crate::state::{FieldEffect, FieldEvent, FieldState};
use crate::timing::{with_minimum_duration, Debouncer};
use skytrips_core::{Location, LocationLookup};
use skytrips_shared::{
    anchored_width, compute_overlay_placement, FrameThrottle, OverlayPlacement, PlacementConfig,
    Rect, Viewport,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::warn;

/// Timer durations for one field.
#[derive(Debug, Clone, Copy)]
pub struct TimingConfig {
    /// Quiet period after the last keystroke before a lookup is issued.
    pub debounce: Duration,
    /// Loader stays visible at least this long.
    pub min_loading: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_loading: Duration::from_millis(300),
        }
    }
}

/// Construction parameters for one autocomplete field.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub label: String,
    pub placeholder: String,
    /// Externally controlled committed value, e.g. a prefilled airport.
    pub initial_value: Option<Location>,
    /// A code that may not be chosen, to keep origin and destination apart.
    pub exclude_code: Option<String>,
    pub timing: TimingConfig,
    pub placement: PlacementConfig,
}

impl FieldConfig {
    pub fn new(label: &str, placeholder: &str) -> Self {
        Self {
            label: label.to_string(),
            placeholder: placeholder.to_string(),
            initial_value: None,
            exclude_code: None,
            timing: TimingConfig::default(),
            placement: PlacementConfig::default(),
        }
    }
}

/// What the field reports outward to the form coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutput {
    /// A selection was committed, or cleared (the empty location).
    Changed(Location),
}

/// Async driver around [`FieldState`].
///
/// Runs as a task over an event queue: applies each event through the pure
/// reducer, then executes the requested effects - debounce timers, lookups
/// wrapped in the minimum-loading guard, fire-and-forget popularity bumps.
pub struct AutocompleteEngine {
    state: Arc<Mutex<FieldState>>,
    lookup: Arc<dyn LocationLookup>,
    timing: TimingConfig,
    events_tx: mpsc::WeakUnboundedSender<FieldEvent>,
    outputs_tx: mpsc::UnboundedSender<FieldOutput>,
    listeners_active: Arc<AtomicBool>,
    debouncer: Debouncer,
}

impl AutocompleteEngine {
    /// Start the driver task. Returns the handle the embedding layer talks
    /// to and the output stream the coordinator listens on. The task ends
    /// when the handle is dropped.
    pub fn spawn(
        config: FieldConfig,
        lookup: Arc<dyn LocationLookup>,
    ) -> (AutocompleteHandle, mpsc::UnboundedReceiver<FieldOutput>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (outputs_tx, outputs_rx) = mpsc::unbounded_channel();

        let state = Arc::new(Mutex::new(FieldState::new(
            &config.label,
            &config.placeholder,
            config.initial_value.clone(),
            config.exclude_code.clone(),
            popular_locations(),
        )));
        let listeners_active = Arc::new(AtomicBool::new(false));

        let engine = AutocompleteEngine {
            state: state.clone(),
            lookup,
            timing: config.timing,
            events_tx: events_tx.downgrade(),
            outputs_tx,
            listeners_active: listeners_active.clone(),
            debouncer: Debouncer::new(config.timing.debounce),
        };
        tokio::spawn(engine.run(events_rx));

        let handle = AutocompleteHandle {
            events: events_tx,
            state,
            listeners_active,
            throttle: FrameThrottle::default(),
            placement_config: config.placement,
            placement: None,
        };
        (handle, outputs_rx)
    }

    async fn run(mut self, mut events: mpsc::UnboundedReceiver<FieldEvent>) {
        while let Some(event) = events.recv().await {
            let effects = self.lock_state().apply(event);
            for effect in effects {
                self.execute(effect);
            }
        }
    }

    fn execute(&mut self, effect: FieldEffect) {
        match effect {
            FieldEffect::ScheduleDebounce { generation } => {
                let events = self.events_tx.clone();
                self.debouncer.schedule(async move {
                    if let Some(events) = events.upgrade() {
                        let _ = events.send(FieldEvent::DebounceElapsed { generation });
                    }
                });
            }
            FieldEffect::IssueLookup { generation, query } => {
                let lookup = self.lookup.clone();
                let events = self.events_tx.clone();
                let min_loading = self.timing.min_loading;
                tokio::spawn(async move {
                    let result =
                        with_minimum_duration(lookup.search(&query), min_loading).await;
                    let Some(events) = events.upgrade() else {
                        return;
                    };
                    let event = match result {
                        Ok(groups) => FieldEvent::LookupSucceeded { generation, groups },
                        Err(err) => {
                            warn!("location lookup failed for {:?}: {}", query, err);
                            FieldEvent::LookupFailed { generation }
                        }
                    };
                    let _ = events.send(event);
                });
            }
            FieldEffect::EmitChange(location) => {
                let _ = self.outputs_tx.send(FieldOutput::Changed(location));
            }
            FieldEffect::MarkPopular { code } => {
                let lookup = self.lookup.clone();
                // Fire-and-forget: a failure is logged and swallowed, never
                // surfaced, and never rolls back the selection.
                tokio::spawn(async move {
                    if let Err(err) = lookup.mark_popular(&code).await {
                        warn!("popularity bump failed for {}: {}", code, err);
                    }
                });
            }
            FieldEffect::AttachViewportListeners => {
                self.listeners_active.store(true, Ordering::SeqCst);
            }
            FieldEffect::DetachViewportListeners => {
                self.listeners_active.store(false, Ordering::SeqCst);
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FieldState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The embedding layer's view of a running field: sends events in, reads
/// state snapshots and overlay placement out.
pub struct AutocompleteHandle {
    events: mpsc::UnboundedSender<FieldEvent>,
    state: Arc<Mutex<FieldState>>,
    listeners_active: Arc<AtomicBool>,
    throttle: FrameThrottle,
    placement_config: PlacementConfig,
    placement: Option<OverlayPlacement>,
}

impl AutocompleteHandle {
    pub fn focus(&self) {
        self.send(FieldEvent::FieldFocused);
    }

    pub fn type_text(&self, text: &str) {
        self.send(FieldEvent::TextChanged(text.to_string()));
    }

    pub fn press_row(&self) {
        self.send(FieldEvent::RowPressed);
    }

    pub fn select_row(&self, location: Location) {
        self.send(FieldEvent::RowSelected(location));
    }

    pub fn toggle_group(&self, group_key: &str) {
        self.send(FieldEvent::GroupToggled(group_key.to_string()));
    }

    pub fn outside_click(&self) {
        self.send(FieldEvent::OutsideClicked);
    }

    pub fn escape(&self) {
        self.send(FieldEvent::EscapePressed);
    }

    pub fn set_exclude_code(&self, exclude_code: Option<String>) {
        self.send(FieldEvent::ExcludeChanged(exclude_code));
    }

    /// Push an externally controlled value into the field (prefill, replay).
    pub fn set_value(&self, location: Location) {
        self.send(FieldEvent::ValueSet(location));
    }

    /// Current field state, cloned for inspection.
    pub fn snapshot(&self) -> FieldState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether document-level scroll/resize listeners should be attached.
    pub fn listeners_active(&self) -> bool {
        self.listeners_active.load(Ordering::SeqCst)
    }

    /// Recompute overlay placement from fresh measurements. Frame-throttled:
    /// bursts of scroll/resize events collapse to one computation per frame,
    /// returning the previous placement in between. Returns `None` once the
    /// overlay is closed and its listeners are detached.
    pub fn reposition(
        &mut self,
        trigger: &Rect,
        viewport: &Viewport,
        now: Instant,
    ) -> Option<OverlayPlacement> {
        if !self.listeners_active() {
            self.placement = None;
            self.throttle.reset();
            return None;
        }
        if !self.throttle.ready(now) {
            return self.placement;
        }
        let width = anchored_width(trigger, viewport, &self.placement_config);
        let placement =
            compute_overlay_placement(trigger, viewport, width, &self.placement_config);
        self.placement = Some(placement);
        self.placement
    }

    fn send(&self, event: FieldEvent) {
        if self.events.send(event).is_err() {
            warn!("autocomplete driver is gone; dropping event");
        }
    }
}
