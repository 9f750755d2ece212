//! Resolution engine for event, venue and lineup data.
//!
//! Normalizes effective field values across overlapping schema generations:
//! ordered-candidate field lookup, the venue fallback cascade, canonical
//! time-ordered lineups, and the event-filter → repository-query planner.
//! Everything here is read-only and degrades to empty values instead of
//! erroring — callers always receive a usable, possibly partial record.

pub mod event;
pub mod field;
pub mod lineup;
pub mod query_plan;
pub mod venue;

pub use event::{EventResolver, ResolvedEvent};
pub use field::resolve_field;
pub use lineup::{
    display_window, Lineup, LineupDisplay, LineupResolver, PerformanceSlot,
};
pub use query_plan::{plan_query, EventFilter};
pub use venue::{Coordinates, Venue, VenueResolver};
