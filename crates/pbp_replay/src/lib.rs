//! Play-by-play replay: reads free-text play logs into stat events, tracks
//! possession and drives, and attributes touchdowns.

pub mod error;
pub mod parsers;
mod patterns;
pub mod possession;
pub mod schema;
pub mod stats;

pub use error::{LocationError, PlayTextError, TeamError};
pub use parsers::parse_play;
pub use possession::{annotate_plays, AnnotatedPlay, FumbleRecovery, RosterLookup};
pub use schema::{flatten_plays, ParsedPlayEvents, PlayEvent, QuarterPlays, RawPlay, StatEvent, StatKind, TeamDescriptor, Teams};
pub use stats::{accumulate_events, box_score, PlayerStatLine};
