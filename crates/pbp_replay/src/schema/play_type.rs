use crate::patterns::{FUMBLE, INTERCEPTION, KICKOFF, PUNT, SAFETY, TIMEOUT, TURNOVER_ON_DOWNS};
use serde::{Deserialize, Serialize};

/// What a log line means for possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayEvent {
	Kickoff,
	Punt,
	Turnover,
	Safety,
	Timeout,
	Snap,
	Fumble,
	Other,
}

impl PlayEvent {
	/// First match wins: kick, punt, interception, turnover on downs, safety,
	/// timeout, then a down marks a snap, then a bare fumble.
	pub fn classify(detail: &str, down: Option<u8>) -> Self {
		match detail {
			s if KICKOFF.is_match(s) => PlayEvent::Kickoff,
			s if PUNT.is_match(s) => PlayEvent::Punt,
			s if INTERCEPTION.is_match(s) || TURNOVER_ON_DOWNS.is_match(s) => PlayEvent::Turnover,
			s if SAFETY.is_match(s) => PlayEvent::Safety,
			s if TIMEOUT.is_match(s) => PlayEvent::Timeout,
			_ if down.is_some_and(|d| (1..=4).contains(&d)) => PlayEvent::Snap,
			s if FUMBLE.is_match(s) => PlayEvent::Fumble,
			_ => PlayEvent::Other,
		}
	}

	/// Kickoffs, punts, turnovers and safeties hand the ball over.
	pub fn is_possession_boundary(&self) -> bool {
		matches!(self, PlayEvent::Kickoff | PlayEvent::Punt | PlayEvent::Turnover | PlayEvent::Safety)
	}
}
