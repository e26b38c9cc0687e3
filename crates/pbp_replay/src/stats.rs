//! Per-player stat lines summed from parsed play events.

use crate::possession::AnnotatedPlay;
use crate::schema::stat_event::{StatEvent, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerStatLine(BTreeMap<StatKind, i32>);

impl PlayerStatLine {
	pub fn get(&self, stat: StatKind) -> i32 {
		self.0.get(&stat).copied().unwrap_or(0)
	}

	pub fn add(&mut self, stat: StatKind, delta: i32) {
		*self.0.entry(stat).or_insert(0) += delta;
	}

}

/// Sums deltas per player and stat. Events without a player are skipped.
pub fn accumulate_events<'a, I>(events: I) -> BTreeMap<String, PlayerStatLine>
where
	I: IntoIterator<Item = &'a StatEvent>,
{
	let mut lines: BTreeMap<String, PlayerStatLine> = BTreeMap::new();
	for event in events {
		if event.player.is_empty() {
			continue;
		}
		lines.entry(event.player.clone()).or_default().add(event.stat, event.delta);
	}
	lines
}

/// Stat lines over any stretch of an annotated log: a drive, a quarter, or
/// the whole game.
pub fn box_score(log: &[AnnotatedPlay]) -> BTreeMap<String, PlayerStatLine> {
	accumulate_events(log.iter().flat_map(|play| play.parsed.events.iter()))
}
