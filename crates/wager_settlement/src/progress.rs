//! How a game in progress is treating a set of wagers.

use crate::scoreboard::{ScoreDelta, Scoreboard};
use crate::wager::{OverUnder, Wager, YardStat};
use pbp_replay::parsers::names::same_player_loose;
use pbp_replay::possession::{find_snap_index, SnapDirection};
use pbp_replay::schema::ScoreKind;
use pbp_replay::{AnnotatedPlay, PlayEvent, Teams};
use serde::{Deserialize, Serialize};

/// Live yardage toward one yardage wager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerProgress {
	pub player: String,
	pub stat: YardStat,
	pub side: OverUnder,
	pub threshold: f64,
	pub progress: f64,
}

impl WagerProgress {
	pub fn new(wager: &Wager) -> Option<Self> {
		match wager {
			Wager::PlayerYards { player, stat, side, threshold } => Some(Self {
				player: player.clone(),
				stat: *stat,
				side: *side,
				threshold: *threshold,
				progress: 0.0,
			}),
			_ => None,
		}
	}

	/// Adds the play's yards for this player; the running total never drops
	/// below zero.
	pub fn apply(&mut self, play: &AnnotatedPlay) {
		if play.is_no_play() {
			return;
		}
		let gained = yards_for(play, &self.player, self.stat);
		if gained != 0 {
			self.progress = (self.progress + f64::from(gained)).max(0.0);
		}
	}

	pub fn cleared(&self) -> bool {
		self.progress > self.threshold
	}
}

/// Progress of every yardage wager through play `through`, inclusive.
pub fn wager_progress(wagers: &[Wager], log: &[AnnotatedPlay], through: usize) -> Vec<WagerProgress> {
	let mut progress: Vec<WagerProgress> = wagers.iter().filter_map(WagerProgress::new).collect();
	for play in log.iter().take(through.saturating_add(1)) {
		for entry in &mut progress {
			entry.apply(play);
		}
	}
	progress
}

fn yards_for(play: &AnnotatedPlay, player: &str, stat: YardStat) -> i32 {
	play.parsed
		.events_for(stat.stat_kind())
		.filter(|e| same_player_loose(&e.player, player))
		.map(|e| e.delta)
		.sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayImpact {
	Positive,
	Negative,
}

/// Whether one play helped or hurt the wager set.
///
/// A touchdown by a player with a touchdown wager is good news. Otherwise
/// yardage for a player with a yardage wager is judged by its side, then a
/// score is judged by whether a backed team scored, then by whether any
/// total is an over. `offense` is the team on offense for the play.
pub fn assess_play_impact(play: &AnnotatedPlay, wagers: &[Wager], teams: &Teams, offense: Option<&str>, delta: ScoreDelta) -> Option<PlayImpact> {
	if play.is_no_play() {
		return None;
	}
	let score_kind = play.score_kind();
	let is_safety = play.event == PlayEvent::Safety;

	if score_kind == Some(ScoreKind::Touchdown) || play.is_touchdown() {
		let backed = wagers
			.iter()
			.any(|w| matches!(w, Wager::PlayerTouchdown { player, .. } if play.touchdown_awarded_to(player)));
		if backed {
			return Some(PlayImpact::Positive);
		}
	}

	let mut moved = false;
	let mut helped = false;
	for wager in wagers {
		if let Wager::PlayerYards { player, stat, side, .. } = wager {
			let gained = yards_for(play, player, *stat);
			if gained == 0 {
				continue;
			}
			moved = true;
			helped |= match side {
				OverUnder::Over => gained > 0,
				OverUnder::Under => gained < 0,
			};
		}
	}
	if moved {
		return Some(if helped { PlayImpact::Positive } else { PlayImpact::Negative });
	}

	let scored = !delta.is_zero() || is_safety || score_kind.is_some();
	if !scored {
		return None;
	}

	let scoring_team = if delta.home > 0.0 {
		Some(teams.home_code())
	} else if delta.away > 0.0 {
		Some(teams.away_code())
	} else if is_safety {
		offense.and_then(|code| teams.opponent_of(code))
	} else {
		offense.map(str::to_string)
	};

	let mut backed_teams = wagers.iter().filter_map(Wager::team).peekable();
	if backed_teams.peek().is_some() {
		if let Some(scoring_team) = scoring_team {
			let favored = backed_teams.any(|team| team.eq_ignore_ascii_case(&scoring_team));
			return Some(if favored { PlayImpact::Positive } else { PlayImpact::Negative });
		}
	}

	let totals: Vec<OverUnder> = wagers
		.iter()
		.filter_map(|w| match w {
			Wager::Total { side, .. } => Some(*side),
			_ => None,
		})
		.collect();
	if totals.is_empty() {
		return None;
	}
	Some(if totals.contains(&OverUnder::Over) { PlayImpact::Positive } else { PlayImpact::Negative })
}

/// Impact of every play in the log, using the running scoreboard for
/// deltas and the latest snap for the offense.
pub fn assess_log_impacts(log: &[AnnotatedPlay], wagers: &[Wager], teams: &Teams) -> Vec<Option<PlayImpact>> {
	let board = Scoreboard::from_log(log, teams);
	log.iter()
		.enumerate()
		.map(|(idx, play)| {
			let offense = find_snap_index(log, idx, SnapDirection::Backward).and_then(|snap| log[snap].pos_team.as_deref());
			assess_play_impact(play, wagers, teams, offense, board.delta_at(idx))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wager::TouchdownTarget;
	use pbp_replay::{annotate_plays, RawPlay, RosterLookup, TeamDescriptor};
	use pretty_assertions::assert_eq;

	fn teams() -> Teams {
		Teams::new(TeamDescriptor::new("BAL", "Baltimore Ravens"), TeamDescriptor::new("PIT", "Pittsburgh Steelers"))
	}

	fn log() -> Vec<AnnotatedPlay> {
		let plays = vec![
			RawPlay::new("L.Jackson pass short right to M.Andrews for 11 yards (M.Fitzpatrick).").with_down(1, "10", "BAL 28"),
			RawPlay::new("L.Jackson sacked at BAL 30 for -9 yards (T.Watt).").with_down(2, "10", "BAL 39"),
			RawPlay::new("M.Andrews left end for -3 yards").with_down(3, "19", "BAL 30"),
			RawPlay::new("L.Jackson pass short middle to M.Andrews for 62 yards, TOUCHDOWN.").with_down(4, "22", "BAL 27").with_score(6.0, 0.0),
			RawPlay::new("J.Tucker extra point is GOOD, Center-N.Moore, Holder-S.Koch.").with_score(7.0, 0.0),
		];
		annotate_plays(&plays, &teams(), &RosterLookup::new())
	}

	fn rec_yds(side: OverUnder) -> Wager {
		Wager::PlayerYards {
			player: "Mark Andrews".to_string(),
			stat: YardStat::RecYds,
			side,
			threshold: 70.5,
		}
	}

	#[test]
	fn test_progress_runs_through_index() {
		let log = log();
		let wagers = vec![rec_yds(OverUnder::Over), Wager::Moneyline { team: "BAL".to_string() }];
		let early = wager_progress(&wagers, &log, 0);
		assert_eq!(early.len(), 1);
		assert_eq!(early[0].progress, 11.0);
		assert!(!early[0].cleared());

		let late = wager_progress(&wagers, &log, 4);
		assert_eq!(late[0].progress, 73.0);
		assert!(late[0].cleared());
	}

	#[test]
	fn test_progress_never_negative() {
		let log = log();
		let wagers = vec![Wager::PlayerYards {
			player: "Lamar Jackson".to_string(),
			stat: YardStat::RushYds,
			side: OverUnder::Under,
			threshold: 40.5,
		}];
		assert_eq!(wager_progress(&wagers, &log, 1)[0].progress, 0.0);
	}

	#[test]
	fn test_impacts() {
		let teams = teams();
		let log = log();
		let wagers = vec![rec_yds(OverUnder::Under), Wager::Moneyline { team: "PIT".to_string() }];
		let impacts = assess_log_impacts(&log, &wagers, &teams);
		assert_eq!(
			impacts,
			vec![Some(PlayImpact::Negative), None, None, Some(PlayImpact::Negative), Some(PlayImpact::Negative)]
		);

		let wagers = vec![Wager::PlayerTouchdown {
			player: "Mark Andrews".to_string(),
			target: TouchdownTarget::AtLeast(1),
		}];
		assert_eq!(assess_log_impacts(&log, &wagers, &teams)[3], Some(PlayImpact::Positive));

		let wagers = vec![Wager::Total { side: OverUnder::Over, line: 44.5 }];
		let impacts = assess_log_impacts(&log, &wagers, &teams);
		assert_eq!(impacts[0], None);
		assert_eq!(impacts[4], Some(PlayImpact::Positive));
	}
}
