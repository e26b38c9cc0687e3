//! Scoring plays and who scored them.

use crate::parsers::names::{clean_player_display_name, last_name, same_player_loose};
use crate::patterns::TOUCHDOWN_WORD;
use crate::schema::stat_event::{ParsedPlayEvents, StatKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EXTRA_POINT_GOOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:extra point|pat)\b.*\bgood\b").unwrap());
static FIELD_GOAL_GOOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bfield goal\b.*\bgood\b").unwrap());
static NO_GOOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bno good\b").unwrap());
static FIELD_GOAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bfield goal\b").unwrap());

/// Conversion attempt written in parentheses after a score: `(J.Tucker kick)`,
/// `(two-point conversion failed)`.
static CONVERSION_PARENTHETICAL: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)\([^)]*\b(?:kick|extra point|two[-\s]?point|2\s*pt|run failed)\b[^)]*\)").unwrap()
});
static SCORING_SHAPE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)\b\d+\s+yard\s+(?:pass\s+from|rush|(?:interception|fumble|punt|kickoff)\s+return)\b").unwrap()
});

static TO_NAME_FOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bto\s+([A-Z][a-zA-Z'.-]+(?:\s+[A-Z][a-zA-Z'.-]+)*)\s+for\b").unwrap());
static LEADING_PASS_FROM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*([^,(]+?)\s+\d+\s+yard\s+pass\s+from\b").unwrap());
static LEADING_RUSH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*([^,(]+?)\s+\d+\s+yard\s+rush\b").unwrap());
static LEADING_RETURN: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)^\s*([^,(]+?)\s+\d+\s+yard\s+(?:interception|fumble|punt|kickoff)\s+return\b").unwrap());
static TOUCHDOWN_BY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btouchdown\b.*?\bby\s+([^,(]+?)(?:\s+for\b|,|\(|\.\s|\.$|$)").unwrap());
static TO_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bto\s+([A-Z][a-zA-Z'.-]+(?:\s+[A-Z][a-zA-Z'.-]+)+)\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreKind {
	#[serde(rename = "TD")]
	Touchdown,
	#[serde(rename = "XP")]
	ExtraPoint,
	#[serde(rename = "FG")]
	FieldGoal,
}

impl ScoreKind {
	pub fn classify(detail: &str) -> Option<Self> {
		if TOUCHDOWN_WORD.is_match(detail) {
			Some(ScoreKind::Touchdown)
		} else if NO_GOOD.is_match(detail) {
			None
		} else if EXTRA_POINT_GOOD.is_match(detail) {
			Some(ScoreKind::ExtraPoint)
		} else if FIELD_GOAL_GOOD.is_match(detail) {
			Some(ScoreKind::FieldGoal)
		} else {
			None
		}
	}

	pub fn points(&self) -> u32 {
		match self {
			ScoreKind::Touchdown => 6,
			ScoreKind::ExtraPoint => 1,
			ScoreKind::FieldGoal => 3,
		}
	}
}

/// The word "touchdown", or a scoring-summary line (`12 yard pass from`)
/// followed by its conversion attempt. Field goals never count.
pub fn is_touchdown_play(detail: &str) -> bool {
	if TOUCHDOWN_WORD.is_match(detail) {
		return true;
	}
	if FIELD_GOAL.is_match(detail) {
		return false;
	}
	CONVERSION_PARENTHETICAL.is_match(detail) && SCORING_SHAPE.is_match(detail)
}

/// Player credited with the touchdown on this play, if one can be named.
///
/// Structured events win: the scoring touchdown stat (receiver or rusher,
/// never the passer), then the receiver on a touchdown catch. Text patterns
/// are the fallback for lines the parser could not read.
pub fn extract_td_scorer(detail: &str, parsed: Option<&ParsedPlayEvents>) -> Option<String> {
	if let Some(parsed) = parsed {
		let scoring = parsed
			.events
			.iter()
			.find(|e| e.stat.is_scoring_touchdown())
			.or_else(|| parsed.events.iter().find(|e| e.stat.is_touchdown()));
		if let Some(event) = scoring {
			return non_empty(clean_player_display_name(&event.player));
		}
		let on_touchdown = |note: Option<&str>| TOUCHDOWN_WORD.is_match(note.unwrap_or(detail));
		if let Some(event) = parsed.events_for(StatKind::RecYds).find(|e| on_touchdown(e.note.as_deref())) {
			return non_empty(clean_player_display_name(&event.player));
		}
	}

	[&*TO_NAME_FOR, &*LEADING_PASS_FROM, &*LEADING_RUSH, &*LEADING_RETURN, &*TOUCHDOWN_BY, &*TO_NAME]
		.iter()
		.find_map(|pattern| pattern.captures(detail).and_then(|caps| caps.get(1)))
		.and_then(|m| non_empty(clean_player_display_name(m.as_str())))
}

/// Whether `player` scored on this play. When no scorer can be named, the
/// player's surname appearing as a whole word in touchdown text is enough.
pub fn touchdown_awarded_to(detail: &str, parsed: Option<&ParsedPlayEvents>, player: &str) -> bool {
	if let Some(scorer) = extract_td_scorer(detail, parsed) {
		return same_player_loose(&scorer, player);
	}
	if !TOUCHDOWN_WORD.is_match(detail) {
		return false;
	}
	let Some(surname) = last_name(player) else {
		return false;
	};
	detail
		.split(|c: char| !(c.is_ascii_alphabetic() || c == '\''))
		.any(|word| word.replace('\'', "").eq_ignore_ascii_case(&surname))
}

fn non_empty(name: String) -> Option<String> {
	if name.is_empty() {
		None
	} else {
		Some(name)
	}
}
