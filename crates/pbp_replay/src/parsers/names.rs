//! Player-name helpers shared by the parser, the possession machine and
//! wager settlement.

use crate::patterns::NAME;
use once_cell::sync::Lazy;
use regex::Regex;

static AFTER_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;].*$").unwrap());
static TRAILING_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)\s*$").unwrap());
static DASH_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+-\s+.*$").unwrap());
static FOR_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+for\b.*$").unwrap());
static PREPOSITION_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+(?:to|from|on|at|with)\b.*$").unwrap());
static NON_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z'.\-\s]").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static DANGLING_PREPOSITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:for|to|from|on|at|with)$").unwrap());

/// A name candidate and the byte offset where it starts in the play text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
	pub start: usize,
	pub name: String,
}

/// Removes every parenthesised segment, nested ones included.
pub fn strip_parentheticals(text: &str) -> String {
	let mut depth = 0usize;
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'(' => depth += 1,
			')' if depth > 0 => depth -= 1,
			_ if depth == 0 => out.push(c),
			_ => {}
		}
	}
	out
}

fn inside_parentheses(text: &str, idx: usize) -> bool {
	let mut depth = 0i32;
	for c in text[..idx].chars() {
		match c {
			'(' => depth += 1,
			')' => depth -= 1,
			_ => {}
		}
	}
	depth > 0
}

/// Name candidates outside parentheses, in text order, first occurrence of
/// each name only. Tacklers and formation tags live in parentheses.
pub fn extract_names(text: &str) -> Vec<NameMatch> {
	let mut found: Vec<NameMatch> = Vec::new();
	for caps in NAME.captures_iter(text) {
		let Some(m) = caps.get(1) else { continue };
		if inside_parentheses(text, m.start()) {
			continue;
		}
		let name = m.as_str().trim().to_string();
		if found.iter().any(|f| f.name == name) {
			continue;
		}
		found.push(NameMatch { start: m.start(), name });
	}
	found
}

/// Closest candidate starting before byte offset `idx`.
pub fn last_name_before(names: &[NameMatch], idx: usize) -> Option<&str> {
	names.iter().rev().find(|n| n.start < idx).map(|n| n.name.as_str())
}

/// Trims a captured name down to the name itself: no trailing clause, no
/// parenthetical, no `for 12 yards` or `to NE 40` tail.
pub fn clean_player_display_name(raw: &str) -> String {
	let t = raw.trim();
	let t = AFTER_SEPARATOR.replace(t, "");
	let t = TRAILING_PAREN.replace(&t, "");
	let t = DASH_TAIL.replace(&t, "");
	let t = FOR_TAIL.replace(&t, "");
	let t = PREPOSITION_TAIL.replace(&t, "");
	let t = NON_NAME_CHARS.replace_all(&t, " ");
	let t = SPACES.replace_all(&t, " ");
	let t = t.trim();
	DANGLING_PREPOSITION.replace(t, "").trim().to_string()
}

/// Canonical comparison form: lowercase letters separated by single spaces.
/// `T.Brady` becomes `t brady`, `D'Andre Swift` becomes `dandre swift`.
pub fn norm_name(raw: &str) -> String {
	let cleaned = clean_player_display_name(raw).to_lowercase();
	let letters: String = cleaned
		.chars()
		.filter(|c| *c != '\'')
		.map(|c| if c.is_ascii_lowercase() { c } else { ' ' })
		.collect();
	letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Last token of the canonical form.
pub fn last_name(raw: &str) -> Option<String> {
	norm_name(raw).rsplit(' ').next().filter(|s| !s.is_empty()).map(str::to_string)
}

/// Equal canonical forms, or the same surname with the same first initial.
///
/// Tolerates `Tom Brady` against `T.Brady` at the cost of the occasional
/// false positive between players who share both.
pub fn same_player_loose(a: &str, b: &str) -> bool {
	let a = norm_name(a);
	let b = norm_name(b);
	if a.is_empty() || b.is_empty() {
		return false;
	}
	if a == b {
		return true;
	}
	let a_tokens: Vec<&str> = a.split(' ').collect();
	let b_tokens: Vec<&str> = b.split(' ').collect();
	let same_last = a_tokens.last() == b_tokens.last();
	let same_initial = a_tokens[0].chars().next() == b_tokens[0].chars().next();
	same_last && same_initial
}
