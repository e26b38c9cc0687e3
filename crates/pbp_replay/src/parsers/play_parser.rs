use crate::error::PlayTextError;
use crate::parsers::names::{clean_player_display_name, extract_names, last_name_before, strip_parentheticals, NameMatch};
use crate::patterns::{FUMBLE, INCOMPLETE, INTERCEPTION, NO_PLAY, PASS, RUSH_HINT, SACK, SPECIAL_TEAMS, TOUCHDOWN, TO_NAME};
use crate::schema::stat_event::{FumbleBy, ParsedPlayEvents, PlayKind, StatKind};
use crate::schema::yards::signed_yards;
use regex::Regex;
use std::str::FromStr;
use tracing::trace;

/// Reads one play description into stat events. Nullified plays and text
/// the parser cannot place come back as the neutral parse.
pub fn parse_play(detail: &str) -> ParsedPlayEvents {
	match detail.parse() {
		Ok(parsed) => parsed,
		Err(err) => {
			trace!(%err, "play contributes no stats");
			ParsedPlayEvents::empty()
		}
	}
}

impl FromStr for ParsedPlayEvents {
	type Err = PlayTextError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if NO_PLAY.is_match(s) {
			return Err(PlayTextError::no_play(s));
		}
		Ok(PlayText::new(s).parse())
	}
}

struct PlayText<'a> {
	detail: &'a str,
	names: Vec<NameMatch>,
	yards: Option<i32>,
	touchdown: bool,
}

impl<'a> PlayText<'a> {
	fn new(detail: &'a str) -> Self {
		Self {
			detail,
			names: extract_names(detail),
			yards: signed_yards(detail),
			touchdown: TOUCHDOWN.is_match(detail),
		}
	}

	fn first_name(&self) -> Option<String> {
		self.names.first().map(|n| n.name.clone())
	}

	/// Nearest name before the first match of `keyword`, else `fallback`.
	fn name_before(&self, keyword: &Regex, fallback: Option<String>) -> Option<String> {
		keyword
			.find(self.detail)
			.and_then(|m| last_name_before(&self.names, m.start()))
			.map(str::to_string)
			.or(fallback)
	}

	fn receiver(&self) -> Option<String> {
		TO_NAME
			.captures(self.detail)
			.and_then(|caps| caps.get(1))
			.map(|m| clean_player_display_name(m.as_str()))
			.filter(|name| !name.is_empty())
	}

	/// Direction words alone are not enough: `End of Quarter` has no carrier.
	fn is_rush(&self) -> bool {
		!self.names.is_empty() && RUSH_HINT.is_match(self.detail) && !SPECIAL_TEAMS.is_match(&strip_parentheticals(self.detail))
	}

	fn parse(self) -> ParsedPlayEvents {
		let mut out = ParsedPlayEvents {
			yards: self.yards,
			touchdown: self.touchdown,
			..ParsedPlayEvents::empty()
		};

		if SACK.is_match(self.detail) {
			self.parse_sack(&mut out);
		} else if PASS.is_match(self.detail) {
			self.parse_pass(&mut out);
		} else if self.is_rush() {
			self.parse_rush(&mut out);
		} else {
			self.record_fumble(&mut out, self.first_name());
		}
		out
	}

	/// The quarterback is charged the lost yardage as a rush; a sack never
	/// gains ground.
	fn parse_sack(&self, out: &mut ParsedPlayEvents) {
		out.kind = PlayKind::Sack;
		let qb = self.name_before(&SACK, self.first_name());
		out.players.sacked_qb.clone_from(&qb);
		out.players.rusher.clone_from(&qb);

		let yards = self.yards.unwrap_or(0);
		let signed = if yards <= 0 { yards } else { -yards };
		out.push_noted(qb.as_deref(), StatKind::RushYds, signed, "sack");
		out.push(qb.as_deref(), StatKind::Sack, 1);

		self.record_fumble(out, qb);
	}

	fn parse_pass(&self, out: &mut ParsedPlayEvents) {
		out.kind = PlayKind::Pass;
		let passer = self.name_before(&PASS, self.first_name());
		let receiver = self.receiver();
		out.players.passer.clone_from(&passer);
		out.players.receiver.clone_from(&receiver);

		let completed = !INCOMPLETE.is_match(self.detail) && !INTERCEPTION.is_match(self.detail);
		out.push(passer.as_deref(), StatKind::PassAtt, 1);
		out.push(receiver.as_deref(), StatKind::Target, 1);

		if completed {
			let yards = self.yards.unwrap_or(0);
			out.push(passer.as_deref(), StatKind::PassYds, yards);
			out.push(passer.as_deref(), StatKind::PassCmp, 1);
			out.push(receiver.as_deref(), StatKind::RecYds, yards);
			out.push(receiver.as_deref(), StatKind::Rec, 1);
			if self.touchdown {
				out.push(passer.as_deref(), StatKind::PassTd, 1);
				out.push(receiver.as_deref(), StatKind::RecTd, 1);
			}
		}

		let carrier = if completed && receiver.is_some() { receiver } else { passer };
		self.record_fumble(out, carrier);
	}

	/// The ball carrier is named first on a rushing play.
	fn parse_rush(&self, out: &mut ParsedPlayEvents) {
		out.kind = PlayKind::Rush;
		let rusher = self.first_name();
		out.players.rusher.clone_from(&rusher);

		out.push(rusher.as_deref(), StatKind::RushYds, self.yards.unwrap_or(0));
		out.push(rusher.as_deref(), StatKind::RushAtt, 1);
		if self.touchdown {
			out.push(rusher.as_deref(), StatKind::RushTd, 1);
		}

		self.record_fumble(out, rusher);
	}

	fn record_fumble(&self, out: &mut ParsedPlayEvents, carrier: Option<String>) {
		if !FUMBLE.is_match(self.detail) {
			return;
		}
		let by = self.name_before(&FUMBLE, carrier);
		out.push(by.as_deref(), StatKind::Fumble, 1);
		out.fumble = Some(FumbleBy { by });
	}
}
