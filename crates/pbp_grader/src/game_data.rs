use crate::error::GraderError;
use pbp_replay::possession::starter_names;
use pbp_replay::{annotate_plays, flatten_plays, AnnotatedPlay, QuarterPlays, RosterLookup, TeamDescriptor, Teams};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;
use wager_settlement::{RawWager, SeasonStatTables};

/// A game as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct GameFile {
	#[serde(deserialize_with = "team_descriptor")]
	pub home: TeamDescriptor,
	#[serde(deserialize_with = "team_descriptor")]
	pub away: TeamDescriptor,
	#[serde(default)]
	pub pbp: QuarterPlays,
	#[serde(default)]
	pub home_starters: Value,
	#[serde(default)]
	pub vis_starters: Value,
	#[serde(default)]
	pub passing_advanced: Value,
	#[serde(default)]
	pub rushing_advanced: Value,
	#[serde(default)]
	pub receiving_advanced: Value,
}

/// A team given either as `{code, name}` or as a bare code.
fn team_descriptor<'de, D>(deserializer: D) -> Result<TeamDescriptor, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum TeamInput {
		Code(String),
		Descriptor(TeamDescriptor),
	}

	Ok(match TeamInput::deserialize(deserializer)? {
		TeamInput::Code(code) => TeamDescriptor::new(&code, ""),
		TeamInput::Descriptor(team) => team,
	})
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, GraderError> {
	let raw = fs::read_to_string(path).map_err(|e| GraderError::read(path, e))?;
	serde_json::from_str(&raw).map_err(|e| GraderError::invalid_json(path, e))
}

impl GameFile {
	pub fn load(path: &Path) -> Result<Self, GraderError> {
		read_json(path)
	}

	pub fn teams(&self) -> Teams {
		Teams::new(self.home.clone(), self.away.clone())
	}
}

pub fn load_wagers(path: &Path) -> Result<Vec<RawWager>, GraderError> {
	read_json(path)
}

/// A loaded game with its log annotated once.
#[derive(Debug, Clone)]
pub struct Game {
	pub teams: Teams,
	pub log: Vec<AnnotatedPlay>,
	pub stats: SeasonStatTables,
}

impl From<GameFile> for Game {
	fn from(file: GameFile) -> Self {
		let teams = file.teams();
		let roster = RosterLookup::from_starters(&starter_names(&file.home_starters), &starter_names(&file.vis_starters), &teams);
		let log = annotate_plays(&flatten_plays(&file.pbp), &teams, &roster);
		info!(
			home = %teams.home_code(),
			away = %teams.away_code(),
			plays = log.len(),
			starters = roster.len(),
			"game annotated"
		);
		let stats = SeasonStatTables::new(&file.passing_advanced, &file.rushing_advanced, &file.receiving_advanced);
		Self { teams, log, stats }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	#[test]
	fn test_game_file_accepts_bare_codes() {
		let file: GameFile = serde_json::from_value(json!({
			"home": "nwe",
			"away": { "code": "TAM", "name": "Tampa Bay Buccaneers" },
			"pbp": { "1": [{ "detail": "T.Brady pass short left to R.Gronkowski for 8 yards", "down": 1, "location": "TAM 25" }] },
			"home_starters": { "Mac Jones": { "pos": "QB" } },
			"vis_starters": ["Tom Brady", "Rob Gronkowski"]
		}))
		.unwrap();
		assert_eq!(file.teams().home_code(), "NWE");
		assert_eq!(file.away.name, "Tampa Bay Buccaneers");

		let game = Game::from(file);
		assert_eq!(game.log.len(), 1);
		assert_eq!(game.log[0].pos_team.as_deref(), Some("TAM"));
		assert!(game.stats.passing.is_empty());
	}

	#[test]
	fn test_missing_file_is_a_read_error() {
		let err = GameFile::load(Path::new("/definitely/not/here.json")).unwrap_err();
		assert!(matches!(err, GraderError::Read { .. }));
	}
}
