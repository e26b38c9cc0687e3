//! Running and final scores read off the play log.

use pbp_replay::{AnnotatedPlay, RawPlay, Teams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalScore {
	pub home: f64,
	pub away: f64,
}

impl FinalScore {
	/// The last play carrying both scores.
	pub fn from_plays<'a, I>(plays: I, teams: &Teams) -> Option<Self>
	where
		I: IntoIterator<Item = &'a RawPlay>,
		I::IntoIter: DoubleEndedIterator,
	{
		plays.into_iter().rev().find_map(|play| play.scores(teams)).map(|(home, away)| Self { home, away })
	}

	pub fn from_log(log: &[AnnotatedPlay], teams: &Teams) -> Option<Self> {
		Self::from_plays(log.iter().map(|p| &p.play), teams)
	}

	pub fn total(&self) -> f64 {
		self.home + self.away
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreDelta {
	pub home: f64,
	pub away: f64,
}

impl ScoreDelta {
	pub fn is_zero(&self) -> bool {
		self.home <= 0.0 && self.away <= 0.0
	}
}

/// Score after every play, carried forward over plays that do not state one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
	states: Vec<FinalScore>,
}

impl Scoreboard {
	pub fn from_log(log: &[AnnotatedPlay], teams: &Teams) -> Self {
		let mut current = FinalScore::default();
		let states = log
			.iter()
			.map(|play| {
				if let Some((home, away)) = play.play.scores(teams) {
					current = FinalScore { home, away };
				}
				current
			})
			.collect();
		Self { states }
	}

	pub fn at(&self, idx: usize) -> Option<FinalScore> {
		self.states.get(idx).copied()
	}

	/// Points scored on play `idx`.
	pub fn delta_at(&self, idx: usize) -> ScoreDelta {
		let Some(now) = self.at(idx) else {
			return ScoreDelta::default();
		};
		let before = idx.checked_sub(1).and_then(|i| self.at(i)).unwrap_or_default();
		ScoreDelta {
			home: now.home - before.home,
			away: now.away - before.away,
		}
	}
}
