pub mod engine;
pub mod popular;
pub mod state;
pub mod timing;

pub use engine::{AutocompleteEngine, AutocompleteHandle, FieldConfig, FieldOutput, TimingConfig};
pub use popular::popular_locations;
pub use state::{FieldEffect, FieldEvent, FieldNotice, FieldPhase, FieldState};
pub use timing::{with_minimum_duration, Debouncer};
