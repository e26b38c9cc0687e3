use crate::schema::loose;
use crate::schema::teams::Teams;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Known quarter labels, in game order.
const QUARTER_ORDER: [&str; 7] = ["1", "2", "3", "4", "5", "OT", "ot"];

/// Play collection as supplied by the feed, keyed by quarter label.
pub type QuarterPlays = BTreeMap<String, Vec<RawPlay>>;

/// Quarter label exactly as the feed wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Quarter(String);

impl Quarter {
	pub fn label(&self) -> &str {
		&self.0
	}

	/// Numeric quarter for `1`..`5`; overtime written as `OT` has none.
	pub fn number(&self) -> Option<u8> {
		self.0.trim().parse().ok()
	}

	pub fn is_overtime(&self) -> bool {
		self.number().map_or_else(|| self.0.eq_ignore_ascii_case("ot"), |n| n >= 5)
	}

	pub fn sort_rank(&self) -> Option<usize> {
		QUARTER_ORDER.iter().position(|q| *q == self.0)
	}
}

impl Ord for Quarter {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self.sort_rank(), other.sort_rank()) {
			(Some(a), Some(b)) => a.cmp(&b),
			(Some(_), None) => Ordering::Less,
			(None, Some(_)) => Ordering::Greater,
			(None, None) => self.0.cmp(&other.0),
		}
	}
}

impl PartialOrd for Quarter {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl From<&str> for Quarter {
	fn from(label: &str) -> Self {
		Quarter(label.to_string())
	}
}

impl fmt::Display for Quarter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl<'de> Deserialize<'de> for Quarter {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = Value::deserialize(deserializer)?;
		loose::text(&value)
			.map(Quarter)
			.ok_or_else(|| serde::de::Error::custom("quarter label must be a string or number"))
	}
}

/// One play as the external feed delivers it. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlay {
	#[serde(default)]
	pub detail: String,
	#[serde(default, deserialize_with = "loose::deserialize_down", skip_serializing_if = "Option::is_none")]
	pub down: Option<u8>,
	#[serde(default, deserialize_with = "loose::deserialize_text", skip_serializing_if = "Option::is_none")]
	pub yds_to_go: Option<String>,
	#[serde(default, deserialize_with = "loose::deserialize_text", skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
	#[serde(default, deserialize_with = "loose::deserialize_number", skip_serializing_if = "Option::is_none")]
	pub pbp_score_hm: Option<f64>,
	#[serde(default, deserialize_with = "loose::deserialize_number", skip_serializing_if = "Option::is_none")]
	pub pbp_score_aw: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub quarter: Option<Quarter>,
	/// Everything else the feed sent, including team-code keyed scores.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

impl RawPlay {
	pub fn new(detail: &str) -> Self {
		Self {
			detail: detail.to_string(),
			..Self::default()
		}
	}

	pub fn with_down(mut self, down: u8, yds_to_go: &str, location: &str) -> Self {
		self.down = Some(down).filter(|d| (1..=4).contains(d));
		self.yds_to_go = Some(yds_to_go.to_string());
		self.location = Some(location.to_string());
		self
	}

	pub fn with_location(mut self, location: &str) -> Self {
		self.location = Some(location.to_string());
		self
	}

	pub fn with_score(mut self, home: f64, away: f64) -> Self {
		self.pbp_score_hm = Some(home);
		self.pbp_score_aw = Some(away);
		self
	}

	pub fn with_quarter(mut self, quarter: &str) -> Self {
		self.quarter = Some(Quarter::from(quarter));
		self
	}

	pub fn is_snap(&self) -> bool {
		self.down.is_some()
	}

	pub fn location(&self) -> &str {
		self.location.as_deref().unwrap_or_default()
	}

	/// Score cell keyed by a team code, matched case-insensitively.
	pub fn keyed_score(&self, code: &str) -> Option<f64> {
		if code.is_empty() {
			return None;
		}
		self.extra.iter().find(|(key, _)| key.eq_ignore_ascii_case(code)).and_then(|(_, value)| loose::number(value))
	}

	/// `(home, away)` running score; canonical fields first, then fields keyed
	/// by team code.
	pub fn scores(&self, teams: &Teams) -> Option<(f64, f64)> {
		let (mut home, mut away) = (self.pbp_score_hm, self.pbp_score_aw);
		if home.is_none() || away.is_none() {
			home = self.keyed_score(&teams.home_code()).or(home);
			away = self.keyed_score(&teams.away_code()).or(away);
		}
		home.zip(away)
	}
}

/// Merges the quarter-keyed collection into one chronological list, stamping
/// each play with the quarter it came from.
pub fn flatten_plays(pbp: &QuarterPlays) -> Vec<RawPlay> {
	let mut quarters: Vec<(Quarter, &Vec<RawPlay>)> = pbp.iter().map(|(key, plays)| (Quarter::from(key.as_str()), plays)).collect();
	quarters.sort_by(|a, b| a.0.cmp(&b.0));

	quarters
		.into_iter()
		.flat_map(|(quarter, plays)| {
			plays.iter().map(move |play| {
				let mut play = play.clone();
				if play.quarter.is_none() {
					play.quarter = Some(quarter.clone());
				}
				play
			})
		})
		.collect()
}
