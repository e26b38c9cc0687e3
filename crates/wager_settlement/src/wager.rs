//! Wagers as they arrive from the bet sheet, and the closed shape the
//! settlement engine grades.

use crate::error::WagerError;
use pbp_replay::schema::loose;
use pbp_replay::StatKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A wager row as read from the sheet. Fields the engine reads may sit at the
/// top level or inside a nested `bet` object; everything else rides along in
/// `extra` and is echoed back on the graded output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWager {
	#[serde(default, deserialize_with = "loose::deserialize_text", skip_serializing_if = "Option::is_none")]
	pub market: Option<String>,
	#[serde(rename = "type", default, deserialize_with = "loose::deserialize_text", skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
	#[serde(default, deserialize_with = "loose::deserialize_text", skip_serializing_if = "Option::is_none")]
	pub selection: Option<String>,
	#[serde(default, deserialize_with = "loose::deserialize_text", skip_serializing_if = "Option::is_none")]
	pub team: Option<String>,
	#[serde(default, deserialize_with = "loose::deserialize_text", skip_serializing_if = "Option::is_none")]
	pub threshold: Option<String>,
	#[serde(default, deserialize_with = "loose::deserialize_text", skip_serializing_if = "Option::is_none")]
	pub details: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bet: Option<Box<RawWager>>,
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

impl RawWager {
	fn field<'a>(&'a self, get: impl Fn(&'a RawWager) -> Option<&'a String>) -> Option<&'a str> {
		get(self).or_else(|| self.bet.as_deref().and_then(&get)).map(String::as_str)
	}

	pub fn market(&self) -> Option<&str> {
		self.field(|w| w.market.as_ref())
	}

	pub fn kind(&self) -> Option<&str> {
		self.field(|w| w.kind.as_ref())
	}

	pub fn selection(&self) -> Option<&str> {
		self.field(|w| w.selection.as_ref())
	}

	pub fn team(&self) -> Option<&str> {
		self.field(|w| w.team.as_ref())
	}

	pub fn threshold(&self) -> Option<&str> {
		self.field(|w| w.threshold.as_ref())
	}

	pub fn details(&self) -> Option<&str> {
		self.field(|w| w.details.as_ref())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverUnder {
	#[serde(rename = "O")]
	Over,
	#[serde(rename = "U")]
	Under,
}

impl OverUnder {
	/// `O`/`OVER` and `U`/`UNDER`, any case.
	pub fn parse(s: &str) -> Option<Self> {
		match s.trim().to_uppercase().as_str() {
			"O" | "OVER" => Some(OverUnder::Over),
			"U" | "UNDER" => Some(OverUnder::Under),
			_ => None,
		}
	}
}

impl fmt::Display for OverUnder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			OverUnder::Over => "O",
			OverUnder::Under => "U",
		})
	}
}

/// Which touchdowns a player touchdown wager is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchdownTarget {
	First,
	Last,
	AtLeast(u32),
}

impl TouchdownTarget {
	/// `first`/`last`, else a count; anything unreadable or below one means
	/// "scores at all".
	pub fn from_threshold(threshold: Option<&str>) -> Self {
		let threshold = threshold.unwrap_or_default().trim();
		if threshold.eq_ignore_ascii_case("first") {
			return TouchdownTarget::First;
		}
		if threshold.eq_ignore_ascii_case("last") {
			return TouchdownTarget::Last;
		}
		let needed = loose::number_from_str(threshold).map_or(1.0, f64::round);
		if needed >= 1.0 {
			TouchdownTarget::AtLeast(needed.min(f64::from(u32::MAX)) as u32)
		} else {
			TouchdownTarget::AtLeast(1)
		}
	}
}

/// Season yardage stats a player prop can be written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YardStat {
	PassYds,
	RecYds,
	RushYds,
}

impl YardStat {
	pub fn parse(kind: &str) -> Option<Self> {
		match kind.trim().to_lowercase().as_str() {
			"pass_yds" => Some(YardStat::PassYds),
			"rec_yds" => Some(YardStat::RecYds),
			"rush_yds" => Some(YardStat::RushYds),
			_ => None,
		}
	}

	pub fn stat_kind(self) -> StatKind {
		match self {
			YardStat::PassYds => StatKind::PassYds,
			YardStat::RecYds => StatKind::RecYds,
			YardStat::RushYds => StatKind::RushYds,
		}
	}
}

impl fmt::Display for YardStat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.stat_kind().as_str())
	}
}

/// A wager the engine knows how to grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "wager", rename_all = "snake_case")]
pub enum Wager {
	PlayerTouchdown { player: String, target: TouchdownTarget },
	PlayerYards { player: String, stat: YardStat, side: OverUnder, threshold: f64 },
	Moneyline { team: String },
	Spread { team: String, line: f64 },
	Total { side: OverUnder, line: f64 },
}

impl Wager {
	pub fn player(&self) -> Option<&str> {
		match self {
			Wager::PlayerTouchdown { player, .. } | Wager::PlayerYards { player, .. } => Some(player),
			_ => None,
		}
	}

	pub fn team(&self) -> Option<&str> {
		match self {
			Wager::Moneyline { team } | Wager::Spread { team, .. } => Some(team),
			_ => None,
		}
	}
}

impl TryFrom<&RawWager> for Wager {
	type Error = WagerError;

	fn try_from(raw: &RawWager) -> Result<Self, Self::Error> {
		let market = raw.market().unwrap_or_default().to_lowercase();
		let kind = raw.kind().unwrap_or_default().to_lowercase();

		match market.as_str() {
			"player" => {
				let player = raw.selection().ok_or(WagerError::MissingSelection)?.to_string();
				if kind == "td" {
					return Ok(Wager::PlayerTouchdown {
						player,
						target: TouchdownTarget::from_threshold(raw.threshold()),
					});
				}
				let stat = YardStat::parse(&kind).ok_or_else(|| WagerError::unsupported_type(&market, &kind))?;
				let threshold = line(raw)?;
				let side = raw.details().and_then(OverUnder::parse).ok_or(WagerError::MissingSide)?;
				Ok(Wager::PlayerYards { player, stat, side, threshold })
			}
			"game" => match kind.as_str() {
				"moneyline" => Ok(Wager::Moneyline { team: team(raw)? }),
				"spread" => Ok(Wager::Spread {
					team: team(raw)?,
					line: line(raw)?,
				}),
				"total" => {
					let side = raw.selection().and_then(OverUnder::parse).ok_or(WagerError::MissingSide)?;
					Ok(Wager::Total { side, line: line(raw)? })
				}
				_ => Err(WagerError::unsupported_type(&market, &kind)),
			},
			_ => Err(WagerError::UnknownMarket { market }),
		}
	}
}

fn line(raw: &RawWager) -> Result<f64, WagerError> {
	raw.threshold().and_then(loose::number_from_str).ok_or_else(|| WagerError::invalid_threshold(raw.threshold()))
}

fn team(raw: &RawWager) -> Result<String, WagerError> {
	raw.team()
		.or_else(|| raw.selection())
		.map(|team| team.trim().to_uppercase())
		.filter(|team| !team.is_empty())
		.ok_or(WagerError::MissingSelection)
}
