use serde::Deserialize;
use skytrips_shared::PlacementConfig;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub timing: TimingSettings,
    pub overlay: PlacementConfig,
    pub calendar: CalendarSettings,
    pub recents: RecentsSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TimingSettings {
    /// Quiet period after the last keystroke before a lookup is issued.
    pub debounce_ms: u64,
    /// Loader stays visible at least this long, regardless of network latency.
    pub min_loading_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_loading_ms: 300,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CalendarSettings {
    /// Single-month calendar width (one-way).
    pub one_way_width: f64,
    /// Two-month calendar width (round trip).
    pub round_trip_width: f64,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            one_way_width: 340.0,
            round_trip_width: 660.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RecentsSettings {
    /// Most-recent-first cap on stored searches.
    pub cap: usize,
}

impl Default for RecentsSettings {
    fn default() -> Self {
        Self { cap: 6 }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // All config files are optional; every field has a default so a
            // bare environment gets the documented behavior.
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SKYTRIPS_TIMING__DEBOUNCE_MS=500`
            .add_source(config::Environment::with_prefix("SKYTRIPS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_behavior() {
        let config = Config::default();
        assert_eq!(config.timing.debounce_ms, 300);
        assert_eq!(config.timing.min_loading_ms, 300);
        assert_eq!(config.recents.cap, 6);
        assert_eq!(config.overlay.narrow_breakpoint, 768.0);
        assert_eq!(config.overlay.flip_threshold, 150.0);
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let config = Config::load().expect("load should not require config files");
        assert_eq!(config.timing.debounce_ms, 300);
        assert_eq!(config.calendar.round_trip_width, 660.0);
    }
}
