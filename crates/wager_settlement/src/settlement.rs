//! Grading wagers against a finished game.

use crate::grade::{Actual, Grade, GradeReason, GradeResult, GradedWager};
use crate::scoreboard::FinalScore;
use crate::season_stats::SeasonStatTables;
use crate::wager::{OverUnder, RawWager, TouchdownTarget, Wager, YardStat};
use pbp_replay::schema::TeamSide;
use pbp_replay::{AnnotatedPlay, Teams};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Everything a wager can be graded against.
#[derive(Debug, Clone, Copy)]
pub struct GradingContext<'a> {
	pub teams: &'a Teams,
	pub log: &'a [AnnotatedPlay],
	pub stats: &'a SeasonStatTables,
}

/// Grades every wager on its own; a wager the engine cannot read grades
/// pending with the reason it was rejected.
pub fn grade_bets(wagers: &[RawWager], ctx: &GradingContext<'_>) -> Vec<GradedWager> {
	let score = FinalScore::from_log(ctx.log, ctx.teams);
	if score.is_none() {
		debug!(plays = ctx.log.len(), "no final score in play log");
	}

	wagers
		.iter()
		.map(|raw| {
			let grade = match Wager::try_from(raw) {
				Ok(wager) => grade_wager(&wager, ctx, score),
				Err(err) => {
					warn!(market = raw.market(), kind = raw.kind(), error = %err, "wager rejected");
					Grade::pending(GradeReason::from(&err))
				}
			};
			GradedWager::new(raw, grade)
		})
		.collect()
}

pub fn grade_wager(wager: &Wager, ctx: &GradingContext<'_>, score: Option<FinalScore>) -> Grade {
	match wager {
		Wager::PlayerTouchdown { player, target } => grade_td_bet_from_pbp(player, ctx.log, *target),
		Wager::PlayerYards { player, stat, side, threshold } => grade_player_yards(player, *stat, *side, *threshold, ctx.stats),
		Wager::Moneyline { team } => grade_moneyline(team, score, ctx.teams),
		Wager::Spread { team, line } => grade_spread(team, *line, score, ctx.teams),
		Wager::Total { side, line } => grade_total(*side, *line, score),
	}
}

/// Touchdown props read the whole log. Touchdowns wiped out by a penalty do
/// not count.
pub fn grade_td_bet_from_pbp(player: &str, log: &[AnnotatedPlay], target: TouchdownTarget) -> Grade {
	if log.is_empty() {
		return Grade::pending(GradeReason::NoPlayByPlay);
	}
	let touchdowns: Vec<&AnnotatedPlay> = log.iter().filter(|p| p.is_touchdown() && !p.is_no_play()).collect();

	match target {
		TouchdownTarget::First | TouchdownTarget::Last => {
			let play = if target == TouchdownTarget::First { touchdowns.first() } else { touchdowns.last() };
			let Some(play) = play else {
				return Grade::pending(GradeReason::NoTouchdownsInLog);
			};
			let hit = play.touchdown_awarded_to(player);
			let reason = GradeReason::TouchdownScorer {
				target,
				player: player.to_string(),
				scorer: play.td_scorer(),
				hit,
			};
			Grade::new(if hit { GradeResult::Won } else { GradeResult::Lost }, reason, Some(Actual::Hit(hit)))
		}
		TouchdownTarget::AtLeast(needed) => {
			let count = u32::try_from(touchdowns.iter().filter(|p| p.touchdown_awarded_to(player)).count()).unwrap_or(u32::MAX);
			let result = if count >= needed { GradeResult::Won } else { GradeResult::Lost };
			let reason = GradeReason::TouchdownCount {
				player: player.to_string(),
				count,
				needed,
			};
			Grade::new(result, reason, Some(Actual::Count(count)))
		}
	}
}

/// Yardage props settle on the season table, not the live log.
pub fn grade_player_yards(player: &str, stat: YardStat, side: OverUnder, threshold: f64, stats: &SeasonStatTables) -> Grade {
	let Some(actual) = stats.player_stat(player, stat) else {
		return Grade::pending(GradeReason::MissingSeasonStat {
			player: player.to_string(),
			stat,
		});
	};
	Grade::over_under(side, actual, threshold, GradeReason::StatComparison { stat, side, actual, threshold })
}

/// `(own, opponent)` points for `team`, or the grade to return instead.
fn own_and_opponent(team: &str, score: Option<FinalScore>, teams: &Teams) -> Result<(f64, f64, FinalScore), Grade> {
	let Some(score) = score else {
		return Err(Grade::pending(GradeReason::NoFinalScore));
	};
	match teams.side_of(team) {
		Ok(TeamSide::Home) => Ok((score.home, score.away, score)),
		Ok(TeamSide::Away) => Ok((score.away, score.home, score)),
		Err(err) => {
			debug!(error = %err, "wager team not in game");
			Err(Grade::pending(GradeReason::UnknownTeam { team: team.to_string() }))
		}
	}
}

pub fn grade_moneyline(team: &str, score: Option<FinalScore>, teams: &Teams) -> Grade {
	let (own, opponent, score) = match own_and_opponent(team, score, teams) {
		Ok(points) => points,
		Err(grade) => return grade,
	};
	let (home, away) = (score.home, score.away);
	match own.partial_cmp(&opponent) {
		Some(Ordering::Equal) => Grade::new(GradeResult::Push, GradeReason::Tied { home, away }, None),
		Some(ordering) => {
			let won = ordering == Ordering::Greater;
			let reason = GradeReason::Moneyline {
				team: team.to_string(),
				won,
				home,
				away,
			};
			Grade::new(if won { GradeResult::Won } else { GradeResult::Lost }, reason, Some(Actual::Hit(won)))
		}
		None => Grade::pending(GradeReason::NoFinalScore),
	}
}

/// Own margin against the line: above wins, equal pushes.
pub fn grade_spread(team: &str, line: f64, score: Option<FinalScore>, teams: &Teams) -> Grade {
	let (own, opponent, _) = match own_and_opponent(team, score, teams) {
		Ok(points) => points,
		Err(grade) => return grade,
	};
	let margin = own - opponent;
	let reason = GradeReason::Margin {
		team: team.to_string(),
		margin,
		line,
	};
	Grade::over_under(OverUnder::Over, margin, line, reason)
}

pub fn grade_total(side: OverUnder, line: f64, score: Option<FinalScore>) -> Grade {
	let Some(score) = score else {
		return Grade::pending(GradeReason::NoFinalScore);
	};
	let total = score.total();
	Grade::over_under(side, total, line, GradeReason::Total { side, total, line })
}
