use chrono::NaiveDate;

/// Visual role of one calendar cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRole {
    Start,
    End,
    InRange,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub disabled: bool,
    pub role: DayRole,
}

/// Eligibility and styling of a single date cell.
///
/// Pure function of its inputs so the grid logic is testable on its own.
/// A date is disabled when it lies before today, or, only while the user is
/// actively picking an end date, before the chosen start. Reopening a
/// committed range does not re-disable anything, so the full prior selection
/// stays visible and editable.
pub fn day_cell(
    date: NaiveDate,
    today: NaiveDate,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    actively_selecting: bool,
) -> DayCell {
    let before_start = match start {
        Some(start) => date < start,
        None => false,
    };
    let disabled = date < today || (actively_selecting && before_start);

    let role = if start == Some(date) {
        DayRole::Start
    } else if end == Some(date) {
        DayRole::End
    } else {
        match (start, end) {
            (Some(start), Some(end)) if date > start && date < end => DayRole::InRange,
            _ => DayRole::Neutral,
        }
    };

    DayCell { disabled, role }
}
