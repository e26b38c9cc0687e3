//! Possession tracking over a chronological play log.
//!
//! One forward pass stamps every play with its offense. Possession-changing
//! plays (kickoff, punt, turnover, safety, lost fumble) only *stage* a flip;
//! the flip lands on the next snap, so the snap that punts still belongs to
//! the punting team.

pub mod locators;
pub mod roster;

use crate::parsers::names::clean_player_display_name;
use crate::parsers::play_parser::parse_play;
use crate::patterns::{FUMBLE, FUMBLE_LOST, NO_PLAY, RECOVERED_BY};
use crate::schema::field::{infer_offense, parse_location, FieldPosition};
use crate::schema::play_by_play::RawPlay;
use crate::schema::play_type::PlayEvent;
use crate::schema::scoring_events::{extract_td_scorer, is_touchdown_play, touchdown_awarded_to, ScoreKind};
use crate::schema::stat_event::ParsedPlayEvents;
use crate::schema::teams::{team_aliases, SideResolver, Teams};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use locators::{drive_summary, drives, find_drive_head_index_robust, find_series_head_index, find_snap_index, DriveSummary, SnapDirection};
pub use roster::{starter_names, RosterLookup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FumbleRecovery {
	pub recovered_by: Option<String>,
	pub recovered_by_team: Option<String>,
	pub recovery_loc: Option<FieldPosition>,
	/// The recovery handed the ball to the other team.
	pub lost: bool,
}

/// A play with everything the replay needs to know about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPlay {
	#[serde(flatten)]
	pub play: RawPlay,
	pub idx: usize,
	pub event: PlayEvent,
	pub is_snap: bool,
	pub start_of_drive: bool,
	pub pos_team: Option<String>,
	pub fumble: Option<FumbleRecovery>,
	pub parsed: ParsedPlayEvents,
}

impl AnnotatedPlay {
	pub fn detail(&self) -> &str {
		&self.play.detail
	}

	pub fn down(&self) -> Option<u8> {
		self.play.down
	}

	pub fn is_no_play(&self) -> bool {
		NO_PLAY.is_match(&self.play.detail)
	}

	pub fn is_first_down(&self) -> bool {
		self.is_snap && self.play.down == Some(1)
	}

	pub fn lost_fumble(&self) -> bool {
		self.fumble.as_ref().is_some_and(|f| f.lost)
	}

	/// Whether the ball changes hands after this play.
	pub fn changes_possession(&self) -> bool {
		!self.is_no_play() && (self.event.is_possession_boundary() || self.lost_fumble())
	}

	pub fn is_touchdown(&self) -> bool {
		is_touchdown_play(&self.play.detail)
	}

	pub fn score_kind(&self) -> Option<ScoreKind> {
		ScoreKind::classify(&self.play.detail)
	}

	pub fn td_scorer(&self) -> Option<String> {
		extract_td_scorer(&self.play.detail, Some(&self.parsed))
	}

	pub fn touchdown_awarded_to(&self, player: &str) -> bool {
		touchdown_awarded_to(&self.play.detail, Some(&self.parsed), player)
	}
}

/// A flip waiting for the next snap. `offense: None` means the new offense is
/// still unknown and will be read from that snap.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StagedFlip {
	offense: Option<String>,
	cause: PlayEvent,
}

struct PossessionTracker<'a> {
	teams: &'a Teams,
	resolver: SideResolver,
	roster: &'a RosterLookup,
	pos_team: Option<String>,
	staged: Option<StagedFlip>,
	last_snap_team: Option<String>,
	seen_snap: bool,
}

impl<'a> PossessionTracker<'a> {
	fn new(teams: &'a Teams, roster: &'a RosterLookup) -> Self {
		Self {
			teams,
			resolver: SideResolver::new(teams),
			roster,
			pos_team: None,
			staged: None,
			last_snap_team: None,
			seen_snap: false,
		}
	}

	fn opponent(&self) -> Option<String> {
		self.pos_team.as_deref().and_then(|code| self.teams.opponent_of(code))
	}

	fn stage(&mut self, idx: usize, offense: Option<String>, cause: PlayEvent) {
		trace!(idx, ?cause, offense = ?offense, "possession flip staged");
		self.staged = Some(StagedFlip { offense, cause });
	}

	/// Lands a staged flip and stamps the snap's offense.
	fn snap(&mut self, play: &mut AnnotatedPlay) {
		let inferred = infer_offense(play.play.location(), &self.resolver, self.teams);

		if let Some(staged) = self.staged.take() {
			let next = staged.offense.or_else(|| inferred.clone()).or_else(|| self.opponent());
			debug!(idx = play.idx, cause = ?staged.cause, from = ?self.pos_team, to = ?next, "possession flipped");
			self.pos_team = next;
		}
		if self.pos_team.is_none() {
			self.pos_team = inferred;
			if self.pos_team.is_none() {
				debug!(idx = play.idx, location = play.play.location(), "offense unresolved at snap");
			}
		}

		play.pos_team.clone_from(&self.pos_team);
		play.start_of_drive = !self.seen_snap || play.pos_team != self.last_snap_team;
		self.seen_snap = true;
		self.last_snap_team.clone_from(&play.pos_team);
	}

	/// Kicking side from the kickoff spot; the other team receives.
	fn receiving_team(&self, play: &AnnotatedPlay) -> Option<String> {
		let side = parse_location(play.play.location())?.side?;
		Some(self.teams.code_of(self.resolver.side_of(&side).opposite()))
	}

	fn recovery(&self, detail: &str) -> Option<FumbleRecovery> {
		if !FUMBLE.is_match(detail) {
			return None;
		}
		let caps = RECOVERED_BY.captures(detail)?;
		let recovered_by = caps.name("name").map(|m| clean_player_display_name(m.as_str())).filter(|n| !n.is_empty());
		let recovered_by_team = recovered_by
			.as_deref()
			.and_then(|name| self.roster.team_of(name))
			.map(str::to_string)
			.or_else(|| caps.name("team").and_then(|m| self.team_for_token(m.as_str())));
		let recovery_loc = caps.name("side").zip(caps.name("yard")).and_then(|(side, yard)| {
			let side = side.as_str().to_uppercase();
			FieldPosition::new(Some(side.as_str()), yard.as_str().parse().ok()?).ok()
		});

		Some(FumbleRecovery {
			recovered_by,
			recovered_by_team,
			recovery_loc,
			lost: false,
		})
	}

	/// Team code for a token that names one of the two teams outright.
	fn team_for_token(&self, token: &str) -> Option<String> {
		let token = token.to_uppercase();
		let home = team_aliases(&self.teams.home);
		let away = team_aliases(&self.teams.away);
		match (home.contains(&token), away.contains(&token)) {
			(true, false) => Some(self.teams.home_code()),
			(false, true) => Some(self.teams.away_code()),
			_ => None,
		}
	}

	/// Stages whatever flip this play causes. Runs after the snap has been
	/// stamped, so the play's own offense is the one giving the ball up.
	fn boundary(&mut self, play: &mut AnnotatedPlay) {
		match play.event {
			PlayEvent::Kickoff => {
				let receiving = self.receiving_team(play);
				self.stage(play.idx, receiving, PlayEvent::Kickoff);
			}
			PlayEvent::Punt | PlayEvent::Turnover | PlayEvent::Safety => {
				let next = self.opponent();
				self.stage(play.idx, next, play.event);
			}
			PlayEvent::Fumble | PlayEvent::Snap => self.fumble(play),
			PlayEvent::Timeout | PlayEvent::Other => {}
		}
	}

	fn fumble(&mut self, play: &mut AnnotatedPlay) {
		let Some(pos_team) = self.pos_team.clone() else {
			return;
		};
		let lost_wording = FUMBLE_LOST.is_match(&play.play.detail);

		if let Some(recovery) = play.fumble.as_mut() {
			let next = match recovery.recovered_by_team.as_deref() {
				Some(team) if team == pos_team => None,
				Some(team) => Some(team.to_string()),
				None if lost_wording => self.teams.opponent_of(&pos_team),
				None => None,
			};
			if let Some(next) = next {
				recovery.lost = true;
				self.stage(play.idx, Some(next), PlayEvent::Fumble);
			}
		} else if lost_wording {
			play.fumble = Some(FumbleRecovery {
				recovered_by: None,
				recovered_by_team: None,
				recovery_loc: None,
				lost: true,
			});
			let next = self.teams.opponent_of(&pos_team);
			self.stage(play.idx, next, PlayEvent::Fumble);
		}
	}
}

fn normalize_parsed_players(mut parsed: ParsedPlayEvents) -> ParsedPlayEvents {
	for event in &mut parsed.events {
		event.player = clean_player_display_name(&event.player);
	}
	parsed.events.retain(|e| !e.player.is_empty());
	parsed
}

/// Annotates a flattened log: event class, snap flag, offense, drive starts,
/// fumble recoveries and parsed stat events. Nullified plays are stamped with
/// the current offense and never stage a flip.
pub fn annotate_plays(plays: &[RawPlay], teams: &Teams, roster: &RosterLookup) -> Vec<AnnotatedPlay> {
	let mut tracker = PossessionTracker::new(teams, roster);
	let mut out = Vec::with_capacity(plays.len());

	for (idx, raw) in plays.iter().enumerate() {
		let no_play = NO_PLAY.is_match(&raw.detail);
		let mut play = AnnotatedPlay {
			play: raw.clone(),
			idx,
			event: PlayEvent::classify(&raw.detail, raw.down),
			is_snap: raw.is_snap(),
			start_of_drive: false,
			pos_team: None,
			fumble: if no_play { None } else { tracker.recovery(&raw.detail) },
			parsed: normalize_parsed_players(parse_play(&raw.detail)),
		};

		if play.is_snap {
			tracker.snap(&mut play);
		} else {
			play.pos_team.clone_from(&tracker.pos_team);
		}
		if !no_play {
			tracker.boundary(&mut play);
		}
		out.push(play);
	}

	debug!(plays = out.len(), drives = out.iter().filter(|p| p.start_of_drive).count(), "annotated play log");
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schema::teams::TeamDescriptor;
	use pretty_assertions::assert_eq;

	fn teams() -> Teams {
		Teams::new(TeamDescriptor::new("BAL", "Baltimore Ravens"), TeamDescriptor::new("PIT", "Pittsburgh Steelers"))
	}

	fn roster() -> RosterLookup {
		RosterLookup::from_starters(
			&["Lamar Jackson".to_string(), "J.K. Dobbins".to_string(), "Marlon Humphrey".to_string()],
			&["Ben Roethlisberger".to_string(), "T.J. Watt".to_string(), "Minkah Fitzpatrick".to_string()],
			&teams(),
		)
	}

	fn offenses(log: &[AnnotatedPlay]) -> Vec<Option<&str>> {
		log.iter().map(|p| p.pos_team.as_deref()).collect()
	}

	#[test]
	fn test_kickoff_then_punt() {
		let plays = vec![
			RawPlay::new("J.Tucker kicks off 65 yards from BAL 35 to end zone, Touchback.").with_location("BAL 35"),
			RawPlay::new("B.Roethlisberger pass short left to D.Johnson to PIT 30 for 5 yards").with_down(1, "10", "PIT 25"),
			RawPlay::new("B.Roethlisberger pass incomplete deep right").with_down(2, "5", "PIT 30"),
			RawPlay::new("J.Berry punts 45 yards to BAL 25, fair catch by D.Duvernay.").with_down(4, "5", "PIT 30"),
			RawPlay::new("L.Jackson left end to BAL 31 for 6 yards").with_down(1, "10", "BAL 25"),
		];
		let log = annotate_plays(&plays, &teams(), &roster());

		assert_eq!(offenses(&log), vec![None, Some("PIT"), Some("PIT"), Some("PIT"), Some("BAL")]);
		assert_eq!(log.iter().map(|p| p.start_of_drive).collect::<Vec<_>>(), vec![false, true, false, false, true]);
		assert_eq!(log[0].event, PlayEvent::Kickoff);
		assert_eq!(log[3].event, PlayEvent::Punt);
		assert!(log[3].is_snap);
		assert!(log[3].changes_possession());
	}

	#[test]
	fn test_offense_inferred_from_first_snap() {
		let plays = vec![
			RawPlay::new("L.Jackson up the middle for 3 yards").with_down(1, "10", "BAL 25"),
			RawPlay::new("Timeout #1 by PIT at 14:10."),
			RawPlay::new("L.Jackson pass incomplete short left").with_down(2, "7", "BAL 28"),
		];
		let log = annotate_plays(&plays, &teams(), &roster());
		assert_eq!(offenses(&log), vec![Some("BAL"), Some("BAL"), Some("BAL")]);
		assert_eq!(log[1].event, PlayEvent::Timeout);
		assert!(log[0].start_of_drive);
		assert!(!log[2].start_of_drive);
	}

	#[test]
	fn test_lost_fumble_flips_on_next_snap() {
		let plays = vec![
			RawPlay::new("L.Jackson up the middle for 3 yards").with_down(1, "10", "BAL 25"),
			RawPlay::new("J.Dobbins right guard to BAL 30 for 2 yards (T.Watt). FUMBLES (T.Watt), recovered by PIT-M.Fitzpatrick at BAL 29.")
				.with_down(2, "7", "BAL 28"),
			RawPlay::new("B.Roethlisberger pass short middle to J.Smith-Schuster for 9 yards").with_down(1, "10", "BAL 29"),
		];
		let log = annotate_plays(&plays, &teams(), &roster());

		assert_eq!(offenses(&log), vec![Some("BAL"), Some("BAL"), Some("PIT")]);
		assert_eq!(
			log[1].fumble,
			Some(FumbleRecovery {
				recovered_by: Some("M.Fitzpatrick".to_string()),
				recovered_by_team: Some("PIT".to_string()),
				recovery_loc: Some(FieldPosition::new(Some("BAL"), 29).unwrap()),
				lost: true,
			})
		);
		assert!(log[1].changes_possession());
		assert!(log[2].start_of_drive);
	}

	#[test]
	fn test_fumble_recovered_by_offense_keeps_possession() {
		let plays = vec![
			RawPlay::new("L.Jackson up the middle for 3 yards").with_down(1, "10", "BAL 25"),
			RawPlay::new("L.Jackson FUMBLES (aborted snap), recovered by BAL-L.Jackson at BAL 26.").with_down(2, "7", "BAL 28"),
			RawPlay::new("L.Jackson pass incomplete short left").with_down(3, "9", "BAL 26"),
		];
		let log = annotate_plays(&plays, &teams(), &roster());
		assert_eq!(offenses(&log), vec![Some("BAL"), Some("BAL"), Some("BAL")]);
		assert!(!log[1].lost_fumble());
		assert!(log[1].fumble.is_some());
		assert!(!log[2].start_of_drive);
	}

	#[test]
	fn test_nullified_punt_does_not_flip() {
		let plays = vec![
			RawPlay::new("L.Jackson up the middle for 3 yards").with_down(1, "10", "BAL 25"),
			RawPlay::new("S.Koch punts 50 yards. PENALTY on PIT, Running Into the Kicker, 5 yards - No Play.").with_down(4, "7", "BAL 28"),
			RawPlay::new("L.Jackson pass incomplete short left").with_down(4, "2", "BAL 33"),
		];
		let log = annotate_plays(&plays, &teams(), &roster());
		assert_eq!(offenses(&log), vec![Some("BAL"), Some("BAL"), Some("BAL")]);
		assert!(!log[1].changes_possession());
	}

	#[test]
	fn test_interception_flips() {
		let plays = vec![
			RawPlay::new("L.Jackson pass short right intended for M.Andrews INTERCEPTED by M.Fitzpatrick at BAL 40.")
				.with_down(3, "4", "BAL 35"),
			RawPlay::new("B.Roethlisberger pass short left to D.Johnson for 6 yards").with_down(1, "10", "BAL 40"),
		];
		let log = annotate_plays(&plays, &teams(), &roster());
		assert_eq!(log[0].event, PlayEvent::Turnover);
		assert_eq!(offenses(&log), vec![Some("BAL"), Some("PIT")]);
		assert!(log[1].start_of_drive);
	}

	#[test]
	fn test_parsed_events_are_attached() {
		let plays = vec![RawPlay::new("L.Jackson pass short left to M.Andrews for 12 yards, TOUCHDOWN.").with_down(1, "10", "PIT 12")];
		let log = annotate_plays(&plays, &teams(), &roster());
		assert!(log[0].is_touchdown());
		assert_eq!(log[0].td_scorer().as_deref(), Some("M.Andrews"));
		assert!(log[0].touchdown_awarded_to("Mark Andrews"));
		assert_eq!(log[0].score_kind(), Some(ScoreKind::Touchdown));
	}
}
