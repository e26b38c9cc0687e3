//! Field coordinates.
//!
//! Locations arrive as `NE 35`, `35 NE`, `NE-35` or a bare `50`. The normalized
//! frame runs 0..=100 from the left end zone; which team defends the left end
//! depends on the quarter.

use crate::error::LocationError;
use crate::schema::play_by_play::Quarter;
use crate::schema::teams::{SideResolver, Teams};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

static SIDE_THEN_YARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]{2,3})[- ]?(\d{1,2})$").unwrap());
static YARD_THEN_SIDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})[- ]?([A-Z]{2,3})$").unwrap());
static BARE_YARD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})$").unwrap());

pub const MIDFIELD: u8 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPosition {
	/// Team token whose half the ball is in; `None` for a bare yard line.
	pub side: Option<String>,
	pub yard: u8,
}

impl FieldPosition {
	pub fn new(side: Option<&str>, yard: u8) -> Result<Self, LocationError> {
		if yard > MIDFIELD {
			return Err(LocationError::YardOutOfRange { yard });
		}
		Ok(Self {
			side: side.map(str::to_string),
			yard,
		})
	}
}

impl FromStr for FieldPosition {
	type Err = LocationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
		if normalized.is_empty() {
			return Err(LocationError::Empty);
		}

		if let Some(caps) = SIDE_THEN_YARD.captures(&normalized) {
			return FieldPosition::new(Some(&caps[1]), caps[2].parse()?);
		}
		if let Some(caps) = YARD_THEN_SIDE.captures(&normalized) {
			return FieldPosition::new(Some(&caps[2]), caps[1].parse()?);
		}
		if let Some(caps) = BARE_YARD.captures(&normalized) {
			return FieldPosition::new(None, caps[1].parse()?);
		}

		Err(LocationError::invalid_format_error(s))
	}
}

pub fn parse_location(location: &str) -> Option<FieldPosition> {
	location.parse().ok()
}

/// Teams swap ends every quarter: home defends the left end zone in the
/// first and third quarters, the right one otherwise (overtime included).
pub fn is_home_left_for_quarter(quarter: &Quarter) -> bool {
	matches!(quarter.number(), Some(1 | 3))
}

/// Distance from the left end zone, 0..=100, in the requested frame.
pub fn yardline_to_percent_by_side(position: Option<&FieldPosition>, resolver: &SideResolver, home_left: bool) -> f64 {
	let Some(position) = position else {
		return f64::from(MIDFIELD);
	};
	let base = match position.side.as_deref() {
		None => f64::from(MIDFIELD),
		Some(side) if resolver.is_home(side) => f64::from(position.yard),
		Some(_) => 100.0 - f64::from(position.yard),
	};
	if home_left {
		base
	} else {
		100.0 - base
	}
}

/// +1 when `team_code` moves toward the right end zone, -1 toward the left,
/// 0 when the code belongs to neither team.
pub fn dir_for_team(team_code: &str, home_left: bool, teams: &Teams) -> i8 {
	let code = team_code.trim().to_uppercase();
	let is_home = if code == teams.home_code() {
		true
	} else if code == teams.away_code() {
		false
	} else {
		return 0;
	};
	if home_left == is_home {
		1
	} else {
		-1
	}
}

/// Offense guess from a snap location: the team whose own territory the ball
/// sits in.
pub fn infer_offense(location: &str, resolver: &SideResolver, teams: &Teams) -> Option<String> {
	let position = parse_location(location)?;
	let side = position.side?;
	Some(teams.code_of(resolver.side_of(&side)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::teams::TeamDescriptor;

	fn teams() -> Teams {
		Teams::new(TeamDescriptor::new("NWE", "New England Patriots"), TeamDescriptor::new("TEN", "Tennessee Titans"))
	}

	#[test]
	fn test_parse_location_forms() {
		let expected = FieldPosition {
			side: Some("NWE".to_string()),
			yard: 35,
		};
		assert_eq!(parse_location("NWE 35"), Some(expected.clone()));
		assert_eq!(parse_location("nwe-35"), Some(expected.clone()));
		assert_eq!(parse_location("35 NWE"), Some(expected.clone()));
		assert_eq!(parse_location("  NWE   35 "), Some(expected));
		assert_eq!(parse_location("50"), Some(FieldPosition { side: None, yard: 50 }));
	}

	#[test]
	fn test_parse_location_errors() {
		assert_eq!("".parse::<FieldPosition>(), Err(LocationError::Empty));
		assert_eq!("NWE 75".parse::<FieldPosition>(), Err(LocationError::YardOutOfRange { yard: 75 }));
		assert!(matches!("midfield".parse::<FieldPosition>(), Err(LocationError::InvalidFormat { .. })));
		assert_eq!(parse_location("NWE"), None);
	}

	#[test]
	fn test_home_left_alternates_by_quarter() {
		assert!(is_home_left_for_quarter(&Quarter::from("1")));
		assert!(!is_home_left_for_quarter(&Quarter::from("2")));
		assert!(is_home_left_for_quarter(&Quarter::from("3")));
		assert!(!is_home_left_for_quarter(&Quarter::from("4")));
		assert!(!is_home_left_for_quarter(&Quarter::from("OT")));
		assert!(!is_home_left_for_quarter(&Quarter::from("5")));
	}

	#[test]
	fn test_yardline_to_percent_by_side() {
		let teams = teams();
		let resolver = SideResolver::new(&teams);
		let home_20 = parse_location("NWE 20");
		let away_20 = parse_location("TEN 20");
		assert_eq!(yardline_to_percent_by_side(home_20.as_ref(), &resolver, true), 20.0);
		assert_eq!(yardline_to_percent_by_side(home_20.as_ref(), &resolver, false), 80.0);
		assert_eq!(yardline_to_percent_by_side(away_20.as_ref(), &resolver, true), 80.0);
		assert_eq!(yardline_to_percent_by_side(None, &resolver, true), 50.0);
		assert_eq!(yardline_to_percent_by_side(parse_location("50").as_ref(), &resolver, false), 50.0);
	}

	#[test]
	fn test_dir_for_team() {
		let teams = teams();
		assert_eq!(dir_for_team("NWE", true, &teams), 1);
		assert_eq!(dir_for_team("NWE", false, &teams), -1);
		assert_eq!(dir_for_team("TEN", true, &teams), -1);
		assert_eq!(dir_for_team("ten", false, &teams), 1);
		assert_eq!(dir_for_team("KC", true, &teams), 0);
	}

	#[test]
	fn test_infer_offense_from_own_territory() {
		let teams = teams();
		let resolver = SideResolver::new(&teams);
		assert_eq!(infer_offense("NWE 25", &resolver, &teams), Some("NWE".to_string()));
		assert_eq!(infer_offense("TEN 40", &resolver, &teams), Some("TEN".to_string()));
		assert_eq!(infer_offense("50", &resolver, &teams), None);
		assert_eq!(infer_offense("", &resolver, &teams), None);
	}
}
