use crate::error::TeamError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Two-word city prefixes whose customary abbreviations are not derivable
/// from initials or prefixes.
const CITY_ABBREVIATIONS: &[(&str, &[&str])] = &[
	("NEW ENGLAND", &["NE"]),
	("NEW ORLEANS", &["NO"]),
	("NEW YORK", &["NY"]),
	("LOS ANGELES", &["LA"]),
	("SAN FRANCISCO", &["SF"]),
	("TAMPA BAY", &["TB"]),
	("GREEN BAY", &["GB"]),
	("KANSAS CITY", &["KC"]),
	("LAS VEGAS", &["LV"]),
	("JACKSONVILLE JAGUARS", &["JAX", "JAC"]),
	("WASHINGTON COMMANDERS", &["WAS", "WSH"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDescriptor {
	pub code: String,
	#[serde(default)]
	pub name: String,
}

impl TeamDescriptor {
	pub fn new(code: &str, name: &str) -> Self {
		Self {
			code: code.to_string(),
			name: name.to_string(),
		}
	}

	pub fn code_upper(&self) -> String {
		self.code.trim().to_uppercase()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
	Home,
	Away,
}

impl TeamSide {
	pub fn opposite(self) -> Self {
		match self {
			TeamSide::Home => TeamSide::Away,
			TeamSide::Away => TeamSide::Home,
		}
	}
}

/// The two teams of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teams {
	pub home: TeamDescriptor,
	pub away: TeamDescriptor,
}

impl Teams {
	pub fn new(home: TeamDescriptor, away: TeamDescriptor) -> Self {
		Self { home, away }
	}

	pub fn home_code(&self) -> String {
		self.home.code_upper()
	}

	pub fn away_code(&self) -> String {
		self.away.code_upper()
	}

	pub fn code_of(&self, side: TeamSide) -> String {
		match side {
			TeamSide::Home => self.home_code(),
			TeamSide::Away => self.away_code(),
		}
	}

	/// Resolves an exact (case-insensitive) team code.
	pub fn side_of(&self, code: &str) -> Result<TeamSide, TeamError> {
		let code = code.trim().to_uppercase();
		if !code.is_empty() && code == self.home_code() {
			Ok(TeamSide::Home)
		} else if !code.is_empty() && code == self.away_code() {
			Ok(TeamSide::Away)
		} else {
			Err(TeamError::UnknownTeam { code })
		}
	}

	/// The other team's code; `None` when `code` belongs to neither team.
	pub fn opponent_of(&self, code: &str) -> Option<String> {
		self.side_of(code).ok().map(|side| self.code_of(side.opposite()))
	}
}

/// Every spelling a play log might use for a team's side of the field.
pub fn team_aliases(team: &TeamDescriptor) -> BTreeSet<String> {
	let code = team.code_upper();
	let name: String = team
		.name
		.to_uppercase()
		.chars()
		.map(|c| if c.is_ascii_uppercase() { c } else { ' ' })
		.collect();
	let words: Vec<&str> = name.split_whitespace().collect();

	let mut aliases = BTreeSet::new();
	aliases.insert(code);

	if let Some(first) = words.first() {
		aliases.insert(words.iter().filter_map(|w| w.chars().next()).collect());
		aliases.insert(prefix(first, 2));
		aliases.insert(prefix(first, 3));
	}
	if let [first, second, ..] = words.as_slice() {
		aliases.insert(format!("{}{}", prefix(first, 1), prefix(second, 1)));
		aliases.insert(prefix(second, 2));
		aliases.insert(prefix(second, 3));

		let key = format!("{first} {second}");
		if let Some((_, extra)) = CITY_ABBREVIATIONS.iter().find(|(city, _)| *city == key) {
			aliases.extend(extra.iter().map(|a| (*a).to_string()));
		}
	}

	aliases.remove("");
	aliases
}

fn prefix(word: &str, n: usize) -> String {
	word.chars().take(n).collect()
}

/// Resolves a loosely written side token (`NE`, `NWE`, `Pat`) to home/away.
#[derive(Debug, Clone)]
pub struct SideResolver {
	home: BTreeSet<String>,
	away: BTreeSet<String>,
}

impl SideResolver {
	pub fn new(teams: &Teams) -> Self {
		Self {
			home: team_aliases(&teams.home),
			away: team_aliases(&teams.away),
		}
	}

	/// Exact alias match first, then prefix either way; anything still
	/// ambiguous is treated as the away side.
	pub fn is_home(&self, side: &str) -> bool {
		let side = side.trim().to_uppercase();
		if side.is_empty() {
			return false;
		}
		if self.home.contains(&side) {
			return true;
		}
		if self.away.contains(&side) {
			return false;
		}
		let overlaps = |alias: &String| alias.starts_with(&side) || side.starts_with(alias.as_str());
		if self.home.iter().any(overlaps) {
			return true;
		}
		false
	}

	pub fn side_of(&self, side: &str) -> TeamSide {
		if self.is_home(side) {
			TeamSide::Home
		} else {
			TeamSide::Away
		}
	}
}
