pub mod day;
pub mod picker;
pub mod placement;

pub use day::{day_cell, DayCell, DayRole};
pub use picker::{CalendarEffect, CalendarEvent, CalendarPhase, DateRangePicker};
pub use placement::{calendar_placement, calendar_width, CalendarWidths};
