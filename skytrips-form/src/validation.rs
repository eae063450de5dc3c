use skytrips_core::{DateRange, Location, TripType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("select a departure airport")]
    MissingOrigin,

    #[error("select a destination airport")]
    MissingDestination,

    #[error("{0} cannot be used for both departure and destination")]
    DuplicateAirport(String),

    #[error("multi-city trips are not supported yet")]
    MultiCityUnsupported,

    #[error("select a departure date")]
    MissingDepartureDate,

    #[error("return date is required for round trips")]
    MissingReturnDate,

    #[error("return date must be after departure date")]
    ReturnBeforeDeparture,

    #[error("select a departure airport before swapping")]
    SwapMissingOrigin,

    #[error("select a destination airport before swapping")]
    SwapMissingDestination,
}

/// Cross-field validation, run at submit time only.
///
/// Rules short-circuit in a fixed order so the user sees one error at a
/// time, pointed at the first offending field.
pub fn validate(
    origin: &Location,
    destination: &Location,
    trip_type: TripType,
    dates: &DateRange,
) -> Result<(), FormError> {
    if !origin.is_selected() {
        return Err(FormError::MissingOrigin);
    }
    if !destination.is_selected() {
        return Err(FormError::MissingDestination);
    }
    if origin.code == destination.code {
        return Err(FormError::DuplicateAirport(origin.city.clone()));
    }
    if trip_type == TripType::MultiCity {
        return Err(FormError::MultiCityUnsupported);
    }
    if dates.start.is_none() {
        return Err(FormError::MissingDepartureDate);
    }
    if trip_type.requires_return() {
        if dates.end.is_none() {
            return Err(FormError::MissingReturnDate);
        }
        if !dates.is_ordered() {
            return Err(FormError::ReturnBeforeDeparture);
        }
    }
    Ok(())
}
