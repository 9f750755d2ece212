//! Calendar views for event navigation widgets.
//!
//! Buckets events by start date and lays them out either as a padded
//! 7-column month grid or as a flat chronological list. Pure data out — no
//! presentation.

pub mod grid;

pub use grid::{
    layout_list, layout_month, CalendarBuilder, CalendarCell, CalendarDay, CalendarMonth,
    CalendarRequest, DayBuckets, DayGroup,
};
