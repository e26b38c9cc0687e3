//! Index lookups over an annotated log: nearest snap, drive head, series
//! head, and whole-drive summaries.

use crate::possession::AnnotatedPlay;
use crate::schema::play_type::PlayEvent;
use crate::schema::scoring_events::ScoreKind;
use crate::schema::stat_event::PlayKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapDirection {
	/// From `i` itself toward the start of the game.
	Backward,
	/// From `i + 1` toward the end of the game.
	Forward,
}

pub fn find_snap_index(log: &[AnnotatedPlay], i: usize, direction: SnapDirection) -> Option<usize> {
	match direction {
		SnapDirection::Backward => {
			let start = i.min(log.len().checked_sub(1)?);
			(0..=start).rev().find(|&k| log[k].is_snap)
		}
		SnapDirection::Forward => (i.saturating_add(1)..log.len()).find(|&k| log[k].is_snap),
	}
}

/// First snap of the drive containing `snap_idx`.
///
/// The nearest possession change strictly before `snap_idx` bounds the
/// drive. Without one, the drive starts after the latest snap run by the
/// other offense, or at the offense's first snap of the game.
pub fn find_drive_head_index_robust(log: &[AnnotatedPlay], snap_idx: usize) -> Option<usize> {
	if snap_idx >= log.len() {
		return None;
	}

	if let Some(boundary) = (0..snap_idx).rev().find(|&j| log[j].changes_possession()) {
		return (boundary + 1..log.len()).find(|&q| log[q].is_snap);
	}

	let offense = log[snap_idx].pos_team.as_deref();
	if offense.is_some() {
		if let Some(other) = (0..=snap_idx).rev().find(|&j| log[j].is_snap && log[j].pos_team.as_deref() != offense) {
			return (other + 1..=snap_idx).find(|&q| log[q].is_snap && log[q].pos_team.as_deref() == offense);
		}
	}
	(0..=snap_idx).find(|&q| log[q].is_snap && (offense.is_none() || log[q].pos_team.as_deref() == offense))
}

/// Latest first-down snap by the same offense within
/// `drive_head..=ref_idx`, else the drive head itself.
pub fn find_series_head_index(log: &[AnnotatedPlay], ref_idx: usize, drive_head: Option<usize>) -> Option<usize> {
	if ref_idx >= log.len() {
		return None;
	}
	let head = drive_head.or_else(|| find_drive_head_index_robust(log, ref_idx))?;
	let offense = log[ref_idx].pos_team.as_deref();
	let series = (head..=ref_idx).rev().find(|&j| log[j].is_first_down() && log[j].pos_team.as_deref() == offense);
	Some(series.unwrap_or(head))
}

/// Every drive head in the log, in game order.
pub fn drives(log: &[AnnotatedPlay]) -> Vec<usize> {
	let mut heads: Vec<usize> = Vec::new();
	for snap in (0..log.len()).filter(|&i| log[i].is_snap) {
		if let Some(head) = find_drive_head_index_robust(log, snap) {
			if !heads.contains(&head) {
				heads.push(head);
			}
		}
	}
	heads
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveSummary {
	pub head: usize,
	/// Last play of the drive, inclusive.
	pub end: usize,
	pub offense: Option<String>,
	pub plays: usize,
	pub snaps: usize,
	pub start_location: Option<String>,
	/// Net yards from scrimmage plays; kicks and returns are not counted.
	pub yards: i32,
	pub scored: Option<ScoreKind>,
	/// The possession change that ended the drive, if the log has one.
	pub ended_by: Option<PlayEvent>,
}

pub fn drive_summary(log: &[AnnotatedPlay], head: usize) -> Option<DriveSummary> {
	let first = log.get(head).filter(|p| p.is_snap)?;
	let next_head = (head + 1..log.len()).find(|&k| log[k].is_snap && find_drive_head_index_robust(log, k) != Some(head));
	let last_candidate = next_head.map_or(log.len() - 1, |k| k - 1);
	let boundary = (head..=last_candidate).find(|&k| log[k].changes_possession());
	let end = boundary.unwrap_or(last_candidate);

	let plays = &log[head..=end];
	let yards = plays
		.iter()
		.filter(|p| p.is_snap && !p.is_no_play() && p.parsed.kind != PlayKind::Other)
		.filter_map(|p| p.parsed.yards)
		.sum();
	let ended_by = boundary.map(|k| if log[k].event.is_possession_boundary() { log[k].event } else { PlayEvent::Fumble });

	Some(DriveSummary {
		head,
		end,
		offense: first.pos_team.clone(),
		plays: plays.len(),
		snaps: plays.iter().filter(|p| p.is_snap).count(),
		start_location: first.play.location.clone(),
		yards,
		scored: plays.iter().find_map(|p| if p.is_no_play() { None } else { p.score_kind() }),
		ended_by,
	})
}
