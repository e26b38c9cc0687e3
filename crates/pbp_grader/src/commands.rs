use crate::config::Command;
use crate::error::GraderError;
use crate::game_data::{load_wagers, Game};
use pbp_replay::possession::{drive_summary, drives};
use pbp_replay::box_score;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use wager_settlement::{assess_log_impacts, grade_bets, wager_progress, GradeResult, GradedWager, GradingContext, PlayImpact, Wager, WagerProgress};

#[derive(Debug, Serialize)]
pub struct PlayTimeline {
	pub idx: usize,
	pub detail: String,
	pub impact: PlayImpact,
	pub progress: Vec<WagerProgress>,
}

#[derive(Debug, Serialize)]
pub struct GradeReport {
	pub graded: Vec<GradedWager>,
	pub timeline: Vec<PlayTimeline>,
}

/// Runs one subcommand against a loaded game.
pub fn run(command: &Command, game: &Game) -> Result<Value, GraderError> {
	match command {
		Command::Annotate => Ok(serde_json::to_value(&game.log)?),
		Command::BoxScore => Ok(serde_json::to_value(box_score(&game.log))?),
		Command::Drives => {
			let summaries: Vec<_> = drives(&game.log).into_iter().filter_map(|head| drive_summary(&game.log, head)).collect();
			debug!(drives = summaries.len(), "drives summarized");
			Ok(serde_json::to_value(summaries)?)
		}
		Command::Grade { bets, timeline } => {
			let wagers = load_wagers(bets)?;
			let ctx = GradingContext {
				teams: &game.teams,
				log: &game.log,
				stats: &game.stats,
			};
			let graded = grade_bets(&wagers, &ctx);
			let settled = graded.iter().filter(|g| g.result != GradeResult::Pending).count();
			info!(wagers = graded.len(), settled, "wagers graded");

			if !timeline {
				return Ok(serde_json::to_value(graded)?);
			}
			let readable: Vec<Wager> = wagers.iter().filter_map(|raw| Wager::try_from(raw).ok()).collect();
			Ok(serde_json::to_value(GradeReport {
				graded,
				timeline: timeline_for(game, &readable),
			})?)
		}
	}
}

/// Plays that moved the wager set, with yardage progress as of each one.
fn timeline_for(game: &Game, wagers: &[Wager]) -> Vec<PlayTimeline> {
	assess_log_impacts(&game.log, wagers, &game.teams)
		.into_iter()
		.enumerate()
		.filter_map(|(idx, impact)| {
			Some(PlayTimeline {
				idx,
				detail: game.log[idx].detail().to_string(),
				impact: impact?,
				progress: wager_progress(wagers, &game.log, idx),
			})
		})
		.collect()
}

pub fn write_output(value: &Value, output: Option<&Path>) -> Result<(), GraderError> {
	let rendered = serde_json::to_string_pretty(value)?;
	match output {
		Some(path) => fs::write(path, rendered).map_err(|source| GraderError::Write {
			path: path.to_path_buf(),
			source,
		}),
		None => {
			println!("{rendered}");
			Ok(())
		}
	}
}
