//! Type-safe wrappers and enums for Sleeper fantasy football data.

pub mod filters;
pub mod ids;
pub mod position;
pub mod time;

pub use filters::{AdpSortKey, DynastyFormat, ScoringFormat, SortDirection, TdSortKey};
pub use ids::{LeagueId, PlayerId, UserId};
pub use position::{Position, RosterSlot};
pub use time::{Season, Week};
