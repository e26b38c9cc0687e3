use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
	RushYds,
	RushAtt,
	RushTd,
	PassYds,
	PassAtt,
	PassCmp,
	PassTd,
	RecYds,
	Rec,
	RecTd,
	Target,
	Fumble,
	Sack,
}

impl StatKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			StatKind::RushYds => "rush_yds",
			StatKind::RushAtt => "rush_att",
			StatKind::RushTd => "rush_td",
			StatKind::PassYds => "pass_yds",
			StatKind::PassAtt => "pass_att",
			StatKind::PassCmp => "pass_cmp",
			StatKind::PassTd => "pass_td",
			StatKind::RecYds => "rec_yds",
			StatKind::Rec => "rec",
			StatKind::RecTd => "rec_td",
			StatKind::Target => "target",
			StatKind::Fumble => "fumble",
			StatKind::Sack => "sack",
		}
	}

	pub fn is_yardage(&self) -> bool {
		matches!(self, StatKind::RushYds | StatKind::PassYds | StatKind::RecYds)
	}

	pub fn is_touchdown(&self) -> bool {
		matches!(self, StatKind::RushTd | StatKind::PassTd | StatKind::RecTd)
	}

	/// Touchdowns credited to the player who crossed the goal line.
	pub fn is_scoring_touchdown(&self) -> bool {
		matches!(self, StatKind::RushTd | StatKind::RecTd)
	}
}

impl fmt::Display for StatKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEvent {
	pub player: String,
	pub stat: StatKind,
	pub delta: i32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub note: Option<String>,
}

impl StatEvent {
	pub fn new(player: &str, stat: StatKind, delta: i32) -> Self {
		Self {
			player: player.to_string(),
			stat,
			delta,
			note: None,
		}
	}

	pub fn with_note(mut self, note: &str) -> Self {
		self.note = Some(note.to_string());
		self
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayKind {
	Pass,
	Rush,
	Sack,
	#[default]
	Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayRoles {
	pub passer: Option<String>,
	pub receiver: Option<String>,
	pub rusher: Option<String>,
	pub sacked_qb: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FumbleBy {
	pub by: Option<String>,
}

/// Structured reading of one play description.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedPlayEvents {
	#[serde(rename = "type")]
	pub kind: PlayKind,
	pub yards: Option<i32>,
	pub touchdown: bool,
	pub fumble: Option<FumbleBy>,
	pub players: PlayRoles,
	/// Narrative order, not significance.
	pub events: Vec<StatEvent>,
}

impl ParsedPlayEvents {
	/// The neutral parse: contributes nothing.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.kind == PlayKind::Other && self.events.is_empty()
	}

	pub fn events_for<'a>(&'a self, stat: StatKind) -> impl Iterator<Item = &'a StatEvent> + 'a {
		self.events.iter().filter(move |e| e.stat == stat)
	}

	pub(crate) fn push(&mut self, player: Option<&str>, stat: StatKind, delta: i32) {
		if let Some(player) = player.filter(|p| !p.is_empty()) {
			self.events.push(StatEvent::new(player, stat, delta));
		}
	}

	pub(crate) fn push_noted(&mut self, player: Option<&str>, stat: StatKind, delta: i32, note: &str) {
		if let Some(player) = player.filter(|p| !p.is_empty()) {
			self.events.push(StatEvent::new(player, stat, delta).with_note(note));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_stat_kind_serializes_snake_case() {
		assert_eq!(serde_json::to_string(&StatKind::RecTd).unwrap(), "\"rec_td\"");
		assert_eq!(serde_json::from_str::<StatKind>("\"pass_yds\"").unwrap(), StatKind::PassYds);
		assert_eq!(StatKind::RushYds.to_string(), "rush_yds");
	}

	#[test]
	fn test_push_skips_unknown_player() {
		let mut parsed = ParsedPlayEvents::empty();
		parsed.push(None, StatKind::RushYds, 4);
		parsed.push(Some(""), StatKind::RushYds, 4);
		assert!(parsed.is_empty());
		parsed.push(Some("D.Henry"), StatKind::RushYds, 4);
		assert_eq!(parsed.events, vec![StatEvent::new("D.Henry", StatKind::RushYds, 4)]);
	}
}
