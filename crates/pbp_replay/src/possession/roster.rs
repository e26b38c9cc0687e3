use crate::parsers::names::{norm_name, same_player_loose};
use crate::schema::teams::Teams;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Keys a starter row may carry its display name under.
const NAME_KEYS: [&str; 8] = ["name", "player", "fullName", "displayName", "last_first", "lastFirst", "Player", "Player Name"];

/// Player name to team code, built from the two starting lineups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterLookup {
	by_name: BTreeMap<String, String>,
}

impl RosterLookup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Later entries win, so a name listed on both sides resolves to away.
	pub fn from_starters(home: &[String], away: &[String], teams: &Teams) -> Self {
		let mut roster = Self::new();
		let (home_code, away_code) = (teams.home_code(), teams.away_code());
		for name in home {
			roster.insert(name, &home_code);
		}
		for name in away {
			roster.insert(name, &away_code);
		}
		roster
	}

	pub fn insert(&mut self, name: &str, team_code: &str) {
		let key = norm_name(name);
		if !key.is_empty() {
			self.by_name.insert(key, team_code.to_string());
		}
	}

	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}

	/// Exact normalised match first, then the loose matcher. A loose hit that
	/// points at both teams is ambiguous and resolves to nothing.
	pub fn team_of(&self, name: &str) -> Option<&str> {
		let key = norm_name(name);
		if key.is_empty() {
			return None;
		}
		if let Some(code) = self.by_name.get(&key) {
			return Some(code.as_str());
		}

		let mut matches = self.by_name.iter().filter(|(known, _)| same_player_loose(known, &key)).map(|(_, code)| code.as_str());
		let first = matches.next()?;
		if matches.all(|code| code == first) {
			Some(first)
		} else {
			debug!(name, "roster match is ambiguous across teams");
			None
		}
	}
}

/// Starter names out of whatever shape the feed used: a list of names, a
/// list of rows, an object of position groups, or an object keyed by player
/// name.
pub fn starter_names(value: &Value) -> Vec<String> {
	match value {
		Value::String(name) => vec![name.clone()],
		Value::Array(rows) => rows.iter().filter_map(row_name).collect(),
		Value::Object(groups) => groups
			.iter()
			.flat_map(|(key, group)| match group {
				Value::Array(rows) => rows.iter().filter_map(row_name).collect::<Vec<_>>(),
				Value::String(_) => row_name(group).into_iter().collect(),
				other => row_name(other).or_else(|| row_name(&Value::String(key.clone()))).into_iter().collect(),
			})
			.collect(),
		_ => Vec::new(),
	}
}

fn row_name(row: &Value) -> Option<String> {
	let name = match row {
		Value::String(name) => Some(name.clone()),
		Value::Object(fields) => NAME_KEYS.iter().find_map(|key| fields.get(*key).and_then(Value::as_str)).map(str::to_string),
		_ => None,
	};
	name.filter(|name| !name.trim().is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::teams::TeamDescriptor;
	use serde_json::json;

	fn teams() -> Teams {
		Teams::new(TeamDescriptor::new("BAL", "Baltimore Ravens"), TeamDescriptor::new("PIT", "Pittsburgh Steelers"))
	}

	#[test]
	fn test_roster_exact_and_loose() {
		let roster = RosterLookup::from_starters(
			&["Lamar Jackson".to_string(), "Mark Andrews".to_string()],
			&["T.J. Watt".to_string(), "Minkah Fitzpatrick".to_string()],
			&teams(),
		);
		assert_eq!(roster.len(), 4);
		assert_eq!(roster.team_of("Lamar Jackson"), Some("BAL"));
		assert_eq!(roster.team_of("M.Fitzpatrick"), Some("PIT"));
		assert_eq!(roster.team_of("T.J. Watt"), Some("PIT"));
		assert_eq!(roster.team_of("J.Dobbins"), None);
		assert_eq!(roster.team_of(""), None);
	}

	#[test]
	fn test_roster_ambiguous_loose_match() {
		let mut roster = RosterLookup::new();
		roster.insert("Mike Williams", "BAL");
		roster.insert("Marcus Williams", "PIT");
		assert_eq!(roster.team_of("M.Williams"), None);
		assert_eq!(roster.team_of("Mike Williams"), Some("BAL"));
	}

	#[test]
	fn test_starter_names_shapes() {
		assert_eq!(starter_names(&json!(["Lamar Jackson", "Mark Andrews"])), vec!["Lamar Jackson", "Mark Andrews"]);
		assert_eq!(
			starter_names(&json!([{ "Player": "Lamar Jackson", "Pos": "QB" }, { "name": "Mark Andrews" }, { "Pos": "TE" }])),
			vec!["Lamar Jackson", "Mark Andrews"]
		);
		assert_eq!(
			starter_names(&json!({ "QB": ["Lamar Jackson"], "TE": { "displayName": "Mark Andrews" } })),
			vec!["Lamar Jackson", "Mark Andrews"]
		);
		assert_eq!(
			starter_names(&json!({ "Lamar Jackson": { "pos": "QB", "g": 15 }, "Mark Andrews": null })),
			vec!["Lamar Jackson", "Mark Andrews"]
		);
		assert!(starter_names(&json!(null)).is_empty());
	}
}
