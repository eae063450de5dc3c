use serde::{Deserialize, Serialize};

/// A pickable origin or destination: an airport (or city) with its short code.
///
/// A cleared field is the all-empty value, never an `Option` - a committed
/// selection is distinguished by a non-empty `code`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub code: String,
    pub display_name: String,
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn new(code: &str, display_name: &str, city: &str, country: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            city: city.to_string(),
            country: country.to_string(),
        }
    }

    /// The cleared value written back when a user resets a field.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_selected(&self) -> bool {
        !self.code.is_empty()
    }

    /// Read-only field text once a selection is committed, e.g. "Kathmandu (KTM)".
    pub fn field_text(&self) -> String {
        format!("{} ({})", self.city, self.code)
    }
}

/// A municipality-level bucket of candidate locations from one lookup query.
///
/// Groups are replaced wholesale on every response and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationGroup {
    pub municipality: String,
    pub country: String,
    pub region: String,
    pub locations: Vec<Location>,
}

impl LocationGroup {
    pub fn new(municipality: &str, country: &str, region: &str, locations: Vec<Location>) -> Self {
        Self {
            municipality: municipality.to_string(),
            country: country.to_string(),
            region: region.to_string(),
            locations,
        }
    }

    /// Stable identity for list keys and the expansion map.
    pub fn group_key(&self) -> String {
        format!("{}|{}|{}", self.municipality, self.country, self.region)
    }
}
