use clap::Parser;
use pbp_grader::{run, Command, Config, Game, GameFile};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, value: &serde_json::Value) -> String {
	let path = dir.join(name);
	fs::write(&path, value.to_string()).unwrap();
	path.to_string_lossy().into_owned()
}

fn game_json() -> serde_json::Value {
	json!({
		"home": "NWE",
		"away": { "code": "TAM", "name": "Tampa Bay Buccaneers" },
		"home_starters": { "Mac Jones": {}, "Damien Harris": {} },
		"vis_starters": { "Tom Brady": {}, "Rob Gronkowski": {}, "Leonard Fournette": {} },
		"receiving_advanced": [{ "name_display": "Rob Gronkowski", "rec_yds": "802" }],
		"pbp": {
			"1": [
				{ "detail": "N.Folk kicks off 65 yards from NWE 35 to end zone, Touchback.", "location": "NWE 35" },
				{ "detail": "T.Brady pass short left to R.Gronkowski for 19 yards.", "down": 1, "yds_to_go": 10, "location": "TAM 25" },
				{ "detail": "L.Fournette right tackle for 5 yards (K.Van Noy). FUMBLES (K.Van Noy), recovered by NWE-K.Van Noy at TAM 49.", "down": 1, "yds_to_go": 10, "location": "TAM 44" },
				{ "detail": "D.Harris up the middle for 49 yards, TOUCHDOWN.", "down": 1, "yds_to_go": 10, "location": "TAM 49", "pbp_score_hm": 6, "pbp_score_aw": 0 },
				{ "detail": "N.Folk extra point is GOOD, Center-J.Cardona, Holder-J.Bailey.", "pbp_score_hm": 7, "pbp_score_aw": 0 }
			],
			"4": [
				{ "detail": "R.Succop 40 yard field goal is GOOD, Center-Z.Triner, Holder-B.Pinion.", "down": 4, "yds_to_go": 3, "location": "NWE 22", "NWE": 7, "TAM": 3 }
			]
		}
	})
}

#[test]
fn test_grade_from_files() {
	let dir = tempfile::tempdir().unwrap();
	let game = write(dir.path(), "game.json", &game_json());
	let bets = write(
		dir.path(),
		"bets.json",
		&json!([
			{ "market": "game", "type": "moneyline", "selection": "NWE" },
			{ "market": "player", "type": "td", "selection": "Damien Harris", "threshold": "first" },
			{ "market": "player", "type": "rec_yds", "selection": "Rob Gronkowski", "threshold": 799.5, "details": "U" },
			{ "market": "game", "type": "total", "selection": "over", "threshold": 10.5 }
		]),
	);

	let config = Config::try_parse_from(["pbp_grader", "--game", &game, "grade", "--bets", &bets, "--timeline"]).unwrap();
	assert_eq!(config.output, None);
	let loaded = Game::from(GameFile::load(&config.game).unwrap());
	let report = run(&config.command, &loaded).unwrap();

	let results: Vec<&str> = report["graded"].as_array().unwrap().iter().map(|g| g["result"].as_str().unwrap()).collect();
	assert_eq!(results, vec!["won", "won", "lost", "lost"]);

	let timeline = report["timeline"].as_array().unwrap();
	let plays: Vec<u64> = timeline.iter().map(|t| t["idx"].as_u64().unwrap()).collect();
	assert_eq!(plays, vec![1, 3, 4, 5]);
	assert_eq!(timeline[0]["impact"], json!("negative"));
	assert_eq!(timeline[0]["progress"][0]["progress"], json!(19.0));
	assert_eq!(timeline[1]["impact"], json!("positive"));
}

#[test]
fn test_fumble_recovery_uses_starters() {
	let dir = tempfile::tempdir().unwrap();
	let game = write(dir.path(), "game.json", &game_json());
	let config = Config::try_parse_from(["pbp_grader", "-g", &game, "annotate"]).unwrap();
	assert_eq!(config.command, Command::Annotate);

	let loaded = Game::from(GameFile::load(&config.game).unwrap());
	let log = run(&config.command, &loaded).unwrap();
	assert_eq!(log[2]["fumble"]["recovered_by_team"], json!("NWE"));
	assert_eq!(log[2]["fumble"]["lost"], json!(true));
	assert_eq!(log[3]["pos_team"], json!("NWE"));
	assert_eq!(log[3]["start_of_drive"], json!(true));
}

#[test]
fn test_bad_bets_file_is_an_error() {
	let dir = tempfile::tempdir().unwrap();
	let game = write(dir.path(), "game.json", &game_json());
	let bets = dir.path().join("bets.json");
	fs::write(&bets, "not json").unwrap();

	let loaded = Game::from(GameFile::load(Path::new(&game)).unwrap());
	let command = Command::Grade { bets, timeline: false };
	let err = run(&command, &loaded).unwrap_err();
	assert!(err.to_string().starts_with("Invalid JSON in"));
}
