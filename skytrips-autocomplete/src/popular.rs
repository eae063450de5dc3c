use skytrips_core::{Location, LocationGroup};

/// Bundled seed shown when the query is empty, so the field has useful
/// content before the user types anything. No network call is involved.
pub fn popular_locations() -> Vec<LocationGroup> {
    vec![
        LocationGroup::new(
            "Sydney",
            "Australia",
            "New South Wales",
            vec![Location::new(
                "SYD",
                "Sydney Kingsford Smith Airport",
                "Sydney",
                "Australia",
            )],
        ),
        LocationGroup::new(
            "Melbourne",
            "Australia",
            "Victoria",
            vec![
                Location::new("MEL", "Melbourne Airport", "Melbourne", "Australia"),
                Location::new("AVV", "Avalon Airport", "Melbourne", "Australia"),
            ],
        ),
        LocationGroup::new(
            "Singapore",
            "Singapore",
            "Singapore",
            vec![Location::new("SIN", "Changi Airport", "Singapore", "Singapore")],
        ),
        LocationGroup::new(
            "Bangkok",
            "Thailand",
            "Bangkok",
            vec![
                Location::new("BKK", "Suvarnabhumi Airport", "Bangkok", "Thailand"),
                Location::new("DMK", "Don Mueang Intl Airport", "Bangkok", "Thailand"),
            ],
        ),
        LocationGroup::new(
            "Dubai",
            "United Arab Emirates",
            "Dubai",
            vec![Location::new(
                "DXB",
                "Dubai International Airport",
                "Dubai",
                "United Arab Emirates",
            )],
        ),
        LocationGroup::new(
            "London",
            "United Kingdom",
            "England",
            vec![
                Location::new("LHR", "Heathrow Airport", "London", "United Kingdom"),
                Location::new("LGW", "Gatwick Airport", "London", "United Kingdom"),
            ],
        ),
    ]
}
