use crate::error::WagerError;
use crate::wager::{OverUnder, RawWager, TouchdownTarget, YardStat};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeResult {
	Won,
	Lost,
	Push,
	Pending,
}

/// The measured value a grade was decided on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Actual {
	Hit(bool),
	Count(u32),
	Value(f64),
}

/// Why a wager graded the way it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum GradeReason {
	NoPlayByPlay,
	NoTouchdownsInLog,
	TouchdownScorer { target: TouchdownTarget, player: String, scorer: Option<String>, hit: bool },
	TouchdownCount { player: String, count: u32, needed: u32 },
	MissingSeasonStat { player: String, stat: YardStat },
	StatComparison { stat: YardStat, side: OverUnder, actual: f64, threshold: f64 },
	NoFinalScore,
	UnknownTeam { team: String },
	Tied { home: f64, away: f64 },
	Moneyline { team: String, won: bool, home: f64, away: f64 },
	Margin { team: String, margin: f64, line: f64 },
	Total { side: OverUnder, total: f64, line: f64 },
	UnsupportedMarket { market: String, kind: String },
	MissingSelection,
	MissingSide,
	InvalidThreshold { input: String },
}

impl From<&WagerError> for GradeReason {
	fn from(err: &WagerError) -> Self {
		match err {
			WagerError::UnknownMarket { market } => GradeReason::UnsupportedMarket {
				market: market.clone(),
				kind: String::new(),
			},
			WagerError::UnsupportedType { market, kind } => GradeReason::UnsupportedMarket {
				market: market.clone(),
				kind: kind.clone(),
			},
			WagerError::MissingSelection => GradeReason::MissingSelection,
			WagerError::MissingSide => GradeReason::MissingSide,
			WagerError::InvalidThreshold { input } => GradeReason::InvalidThreshold { input: input.clone() },
		}
	}
}

fn relation(actual: f64, threshold: f64) -> &'static str {
	match actual.partial_cmp(&threshold) {
		Some(Ordering::Greater) => ">",
		Some(Ordering::Less) => "<",
		_ => "=",
	}
}

impl fmt::Display for GradeReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			GradeReason::NoPlayByPlay => write!(f, "No PBP"),
			GradeReason::NoTouchdownsInLog => write!(f, "No TDs in PBP"),
			GradeReason::TouchdownScorer { target, player, scorer, hit } => {
				let which = if *target == TouchdownTarget::Last { "Last" } else { "First" };
				match (hit, scorer) {
					(true, _) => write!(f, "{which} TD: {player}"),
					(false, Some(scorer)) => write!(f, "{which} TD: {scorer}, not {player}"),
					(false, None) => write!(f, "{which} TD not {player}"),
				}
			}
			GradeReason::TouchdownCount { player, count, needed } => write!(f, "{player} TDs: {count} (need {needed})"),
			GradeReason::MissingSeasonStat { player, stat } => write!(f, "No season {stat} for {player}"),
			GradeReason::StatComparison { stat, side, actual, threshold } => {
				write!(f, "{stat} {actual} {} {threshold} ({side})", relation(*actual, *threshold))
			}
			GradeReason::NoFinalScore => write!(f, "No final score"),
			GradeReason::UnknownTeam { team } => write!(f, "Team {team} is not in this game"),
			GradeReason::Tied { home, away } => write!(f, "Tied {home}-{away}"),
			GradeReason::Moneyline { team, won, home, away } => {
				write!(f, "{team} {} ({home}-{away})", if *won { "won" } else { "lost" })
			}
			GradeReason::Margin { team, margin, line } => write!(f, "{team} margin {margin} {} {line}", relation(*margin, *line)),
			GradeReason::Total { side, total, line } => write!(f, "Total {total} {} {line} ({side})", relation(*total, *line)),
			GradeReason::UnsupportedMarket { market, kind } => write!(f, "Unsupported market {market}/{kind}"),
			GradeReason::MissingSelection => write!(f, "Missing selection"),
			GradeReason::MissingSide => write!(f, "Missing O/U"),
			GradeReason::InvalidThreshold { input } => write!(f, "Invalid threshold {input:?}"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
	pub result: GradeResult,
	pub reason: GradeReason,
	pub actual: Option<Actual>,
}

impl Grade {
	pub fn new(result: GradeResult, reason: GradeReason, actual: Option<Actual>) -> Self {
		Self { result, reason, actual }
	}

	pub fn pending(reason: GradeReason) -> Self {
		Self::new(GradeResult::Pending, reason, None)
	}

	/// Won above the line, lost below, push on it.
	pub fn over_under(side: OverUnder, actual: f64, line: f64, reason: GradeReason) -> Self {
		let result = match (actual.partial_cmp(&line), side) {
			(Some(Ordering::Equal), _) => GradeResult::Push,
			(Some(Ordering::Greater), OverUnder::Over) | (Some(Ordering::Less), OverUnder::Under) => GradeResult::Won,
			(Some(_), _) => GradeResult::Lost,
			(None, _) => return Self::pending(reason),
		};
		Self::new(result, reason, Some(Actual::Value(actual)))
	}
}

/// The input wager with its grade attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedWager {
	#[serde(flatten)]
	pub wager: RawWager,
	pub result: GradeResult,
	pub reason: GradeReason,
	pub actual: Option<Actual>,
}

impl GradedWager {
	/// Grades from an earlier run are dropped from the echoed fields.
	pub fn new(wager: &RawWager, grade: Grade) -> Self {
		let mut wager = wager.clone();
		for key in ["result", "reason", "actual"] {
			wager.extra.remove(key);
		}
		Self {
			wager,
			result: grade.result,
			reason: grade.reason,
			actual: grade.actual,
		}
	}
}
