pub mod field;
pub mod loose;
pub mod play_by_play;
pub mod play_type;
pub mod scoring_events;
pub mod stat_event;
pub mod teams;
pub mod yards;

pub use field::{dir_for_team, infer_offense, is_home_left_for_quarter, parse_location, yardline_to_percent_by_side, FieldPosition};
pub use play_by_play::{flatten_plays, Quarter, QuarterPlays, RawPlay};
pub use play_type::PlayEvent;
pub use scoring_events::{extract_td_scorer, is_touchdown_play, touchdown_awarded_to, ScoreKind};
pub use stat_event::{FumbleBy, ParsedPlayEvents, PlayKind, PlayRoles, StatEvent, StatKind};
pub use teams::{SideResolver, TeamDescriptor, TeamSide, Teams};
pub use yards::{signed_yards, YardType, Yards};
