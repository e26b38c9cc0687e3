//! Shared play-text patterns.
//!
//! Everything here is compiled once. Patterns are case-insensitive unless the
//! capitalisation itself carries meaning (player names).

use once_cell::sync::Lazy;
use regex::Regex;

/// A player name: `T.Brady`, `T. Brady`, `T.J. Watt`, or two or more
/// capitalised tokens (`Tom Brady`, `Kyle Van Noy`).
///
/// A full token needs a lowercase second letter so that team codes and
/// shouted words (`NE`, `TOUCHDOWN`, `PENALTY`) never read as names.
pub(crate) const NAME_PATTERN: &str =
	r"(?:[A-Z]\.){1,2}\s?[A-Z][a-zA-Z'-]+|(?:[A-Z][a-z][a-zA-Z'-]*|[A-Z]\.)(?:\s+(?:[A-Z][a-z][a-zA-Z'-]*|[A-Z]\.))+";

pub(crate) static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"\b({NAME_PATTERN})")).unwrap());

pub(crate) static NO_PLAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bno play\b|nullified|offsetting").unwrap());
pub(crate) static TOUCHDOWN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btouchdown\b|\bfor a td\b").unwrap());
pub(crate) static TOUCHDOWN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btouchdown\b").unwrap());
pub(crate) static FUMBLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bfumble[sd]?\b").unwrap());
pub(crate) static SACK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsack(?:ed|s)?\b").unwrap());
pub(crate) static PASS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bpass(?:es|ed)?\b").unwrap());
pub(crate) static INCOMPLETE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bincomplete\b").unwrap());
pub(crate) static RUSH_HINT: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)\b(?:runs?|rush(?:es|ed)?|scrambles?|left|right|middle|guard|tackle|end)\b").unwrap());

pub(crate) static SPECIAL_TEAMS: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)\bkicks?\b|\bkickoff\b|\bpunts?\b|\bfield goal\b|\bextra point\b").unwrap());
pub(crate) static KICKOFF: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bkicks off\b|\bkickoff\b").unwrap());
pub(crate) static PUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bpunts?\b").unwrap());
pub(crate) static INTERCEPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bintercept|\bpicked off\b").unwrap());
pub(crate) static TURNOVER_ON_DOWNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bturnover on downs\b|\bon downs\b").unwrap());
pub(crate) static SAFETY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsafety\b").unwrap());
pub(crate) static TIMEOUT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btimeout\b").unwrap());
pub(crate) static TOUCHBACK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\btouchback\b").unwrap());

/// Any recovery after a fumble, or an explicit "lost" wording.
pub(crate) static FUMBLE_LOST: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)\bfumble[sd]?\b.*\brecovered by\b|\bfumble lost\b|\blost fumble\b").unwrap());

/// `recovered by [TEAM-]NAME [at SIDE YARD]`. A lone surname is accepted
/// here since the clause itself marks the name.
pub(crate) static RECOVERED_BY: Lazy<Regex> = Lazy::new(|| {
	Regex::new(&format!(
		r"(?i:recovered by)\s+(?:(?P<team>[A-Z]{{2,3}})-)?(?P<name>{NAME_PATTERN}|[A-Z][a-z][a-zA-Z'-]*)(?:\s+(?i:at)\s+(?P<side>[A-Za-z]{{2,3}})[- ]?(?P<yard>\d{{1,2}}))?"
	))
	.unwrap()
});

/// Receiver or target: `to NAME`, `intended for NAME`.
pub(crate) static TO_NAME: Lazy<Regex> =
	Lazy::new(|| Regex::new(&format!(r"\b(?i:to|intended for)\s+({NAME_PATTERN})")).unwrap());
