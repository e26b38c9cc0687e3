use crate::wager::YardStat;
use pbp_replay::parsers::names::{norm_name, same_player_loose};
use pbp_replay::schema::loose;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const NAME_KEYS: [&str; 4] = ["name_display", "name", "player", "Player"];
const GAMES_KEYS: [&str; 3] = ["g", "games", "G"];

/// One player's season totals from an advanced-stats table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
	pub name: String,
	pub cells: BTreeMap<String, Value>,
}

impl StatRow {
	pub fn stat(&self, key: &str) -> Option<f64> {
		self.cells.get(key).and_then(loose::number)
	}

	pub fn games_played(&self) -> Option<f64> {
		GAMES_KEYS.iter().find_map(|key| self.stat(key))
	}

	fn from_fields(name: Option<&str>, fields: &Map<String, Value>) -> Option<Self> {
		let name = name
			.map(str::to_string)
			.or_else(|| NAME_KEYS.iter().find_map(|key| fields.get(*key).and_then(loose::text)))
			.filter(|name| !name.trim().is_empty())?;
		Some(Self {
			name,
			cells: fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
		})
	}
}

/// Rows out of a table given as an array of rows, an object of rows keyed
/// by player name, or an object of row arrays.
pub fn stat_rows(table: &Value) -> Vec<StatRow> {
	match table {
		Value::Array(rows) => rows.iter().filter_map(|row| row.as_object().and_then(|fields| StatRow::from_fields(None, fields))).collect(),
		Value::Object(entries) => entries
			.iter()
			.flat_map(|(key, entry)| match entry {
				Value::Object(fields) => {
					let named = NAME_KEYS.iter().any(|k| fields.contains_key(*k));
					StatRow::from_fields(if named { None } else { Some(key.as_str()) }, fields).into_iter().collect::<Vec<_>>()
				}
				Value::Array(_) => stat_rows(entry),
				_ => Vec::new(),
			})
			.collect(),
		_ => Vec::new(),
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonStatTables {
	pub passing: Vec<StatRow>,
	pub rushing: Vec<StatRow>,
	pub receiving: Vec<StatRow>,
}

impl SeasonStatTables {
	pub fn new(passing: &Value, rushing: &Value, receiving: &Value) -> Self {
		Self {
			passing: stat_rows(passing),
			rushing: stat_rows(rushing),
			receiving: stat_rows(receiving),
		}
	}

	fn table(&self, stat: YardStat) -> &[StatRow] {
		match stat {
			YardStat::PassYds => &self.passing,
			YardStat::RushYds => &self.rushing,
			YardStat::RecYds => &self.receiving,
		}
	}

	/// Exact normalised name first, then the loose matcher.
	pub fn row_for(&self, player: &str, stat: YardStat) -> Option<&StatRow> {
		let rows = self.table(stat);
		let key = norm_name(player);
		if key.is_empty() {
			return None;
		}
		rows.iter()
			.find(|row| norm_name(&row.name) == key)
			.or_else(|| rows.iter().find(|row| same_player_loose(&row.name, player)))
	}

	pub fn player_stat(&self, player: &str, stat: YardStat) -> Option<f64> {
		self.row_for(player, stat).and_then(|row| row.stat(&stat.to_string()))
	}
}
