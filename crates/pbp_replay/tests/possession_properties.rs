use pbp_replay::possession::{drives, find_drive_head_index_robust, find_series_head_index};
use pbp_replay::schema::ScoreKind;
use pbp_replay::{annotate_plays, box_score, flatten_plays, AnnotatedPlay, QuarterPlays, RosterLookup, StatKind, TeamDescriptor, Teams};
use pretty_assertions::assert_eq;
use serde_json::json;

fn teams() -> Teams {
	Teams::new(TeamDescriptor::new("BAL", "Baltimore Ravens"), TeamDescriptor::new("PIT", "Pittsburgh Steelers"))
}

fn roster(teams: &Teams) -> RosterLookup {
	let home = ["Lamar Jackson", "J.K. Dobbins", "Mark Andrews", "Marlon Humphrey", "Patrick Queen"].map(String::from);
	let away = ["Ben Roethlisberger", "James Conner", "JuJu Smith-Schuster", "T.J. Watt", "Minkah Fitzpatrick"].map(String::from);
	RosterLookup::from_starters(&home, &away, teams)
}

fn game() -> QuarterPlays {
	serde_json::from_value(json!({
		"2": [
			{ "detail": "J.Tucker kicks off 65 yards from BAL 35 to end zone, Touchback.", "location": "BAL 35", "down": "" },
			{ "detail": "B.Roethlisberger pass short right intended for D.Johnson INTERCEPTED by M.Humphrey at PIT 40. M.Humphrey to PIT 31 for 9 yards.", "down": 1, "yds_to_go": 10, "location": "PIT 25" },
			{ "detail": "J.Dobbins right guard to PIT 27 for 4 yards.", "down": "1", "yds_to_go": "10", "location": "PIT 31" },
			{ "detail": "J.Dobbins left end for 27 yards, TOUCHDOWN.", "down": 2, "yds_to_go": 6, "location": "PIT 27", "pbp_score_hm": 13, "pbp_score_aw": 0 },
			{ "detail": "J.Tucker extra point is GOOD, Center-N.Moore, Holder-S.Koch.", "pbp_score_hm": "14", "pbp_score_aw": "0" },
			{ "detail": "J.Tucker kicks off 65 yards from BAL 35 to end zone, Touchback.", "location": "BAL 35" },
			{ "detail": "B.Roethlisberger pass deep left to C.Claypool for 20 yards.", "down": 1, "yds_to_go": 10, "location": "PIT 25" }
		],
		"1": [
			{ "detail": "C.Boswell kicks off 65 yards from PIT 35 to BAL 0. D.Duvernay to BAL 28 for 28 yards (M.Killebrew).", "location": "PIT 35" },
			{ "detail": "L.Jackson pass short right to M.Andrews to BAL 39 for 11 yards (M.Fitzpatrick).", "down": 1, "yds_to_go": 10, "location": "BAL 28" },
			{ "detail": "J.Dobbins left tackle to BAL 43 for 4 yards (T.Watt).", "down": 1, "yds_to_go": 10, "location": "BAL 39" },
			{ "detail": "PENALTY on BAL-O.Brown, False Start, 5 yards, enforced at BAL 43 - No Play.", "down": 2, "yds_to_go": 6, "location": "BAL 43" },
			{ "detail": "L.Jackson pass incomplete deep left to M.Brown.", "down": 2, "yds_to_go": 11, "location": "BAL 38" },
			{ "detail": "L.Jackson sacked at BAL 30 for -8 yards (T.Watt).", "down": 3, "yds_to_go": 11, "location": "BAL 38" },
			{ "detail": "S.Koch punts 47 yards to PIT 23, Center-N.Moore. D.Johnson to PIT 30 for 7 yards (C.Board).", "down": 4, "yds_to_go": 19, "location": "BAL 30" },
			{ "detail": "B.Roethlisberger pass short left to J.Smith-Schuster to PIT 38 for 8 yards (M.Humphrey).", "down": 1, "yds_to_go": 10, "location": "PIT 30" },
			{ "detail": "J.Conner right end to PIT 41 for 3 yards (P.Queen). FUMBLES (P.Queen), recovered by BAL-M.Humphrey at PIT 41.", "down": 2, "yds_to_go": 2, "location": "PIT 38" },
			{ "detail": "Timeout #1 by PIT at 03:12." },
			{ "detail": "L.Jackson up the middle to PIT 35 for 6 yards (C.Heyward).", "down": 1, "yds_to_go": 10, "location": "PIT 41" },
			{ "detail": "L.Jackson pass short middle to M.Andrews for 35 yards, TOUCHDOWN.", "down": 2, "yds_to_go": 4, "location": "PIT 35", "pbp_score_hm": 6, "pbp_score_aw": 0 },
			{ "detail": "J.Tucker extra point is GOOD, Center-N.Moore, Holder-S.Koch.", "BAL": 7, "PIT": 0 }
		]
	}))
	.unwrap()
}

fn annotated() -> Vec<AnnotatedPlay> {
	let teams = teams();
	annotate_plays(&flatten_plays(&game()), &teams, &roster(&teams))
}

#[test]
fn test_offense_per_play() {
	let log = annotated();
	let offenses: Vec<Option<&str>> = log.iter().map(|p| p.pos_team.as_deref()).collect();
	let bal = Some("BAL");
	let pit = Some("PIT");
	assert_eq!(
		offenses,
		vec![None, bal, bal, bal, bal, bal, bal, pit, pit, pit, bal, bal, bal, bal, pit, bal, bal, bal, bal, pit]
	);
	assert_eq!(log[0].play.quarter.as_ref().map(|q| q.label()), Some("1"));
	assert_eq!(log[13].play.quarter.as_ref().map(|q| q.label()), Some("2"));
}

#[test]
fn test_offense_changes_only_after_a_boundary() {
	let log = annotated();
	let mut boundary_seen = false;
	let mut prev: Option<&str> = None;
	for play in &log {
		let current = play.pos_team.as_deref();
		if prev.is_some() && current != prev {
			assert!(play.is_snap, "offense changed off a snap at {}", play.idx);
			assert!(boundary_seen, "offense changed without a preceding boundary at {}", play.idx);
			boundary_seen = false;
		}
		if play.changes_possession() {
			boundary_seen = true;
		}
		prev = current;
	}
}

#[test]
fn test_start_of_drive_marks_offense_changes() {
	let log = annotated();
	let mut prev_snap: Option<&AnnotatedPlay> = None;
	for play in log.iter().filter(|p| p.is_snap) {
		let expected = prev_snap.map_or(true, |prev| prev.pos_team != play.pos_team);
		assert_eq!(play.start_of_drive, expected, "play {}", play.idx);
		prev_snap = Some(play);
	}
	let starts: Vec<usize> = log.iter().filter(|p| p.start_of_drive).map(|p| p.idx).collect();
	assert_eq!(starts, vec![1, 7, 10, 14, 15, 19]);
}

#[test]
fn test_drive_head_is_shared_within_a_drive() {
	let log = annotated();
	let mut current_head = None;
	for play in log.iter().filter(|p| p.is_snap) {
		if play.start_of_drive {
			current_head = Some(play.idx);
		}
		assert_eq!(find_drive_head_index_robust(&log, play.idx), current_head, "snap {}", play.idx);
	}
	assert_eq!(drives(&log), vec![1, 7, 10, 14, 15, 19]);
	assert_eq!(find_series_head_index(&log, 5, None), Some(2));
}

#[test]
fn test_lost_fumble_and_scores() {
	let log = annotated();
	assert!(log[8].lost_fumble());
	assert_eq!(log[8].fumble.as_ref().and_then(|f| f.recovered_by_team.as_deref()), Some("BAL"));

	let scorers: Vec<String> = log.iter().filter(|p| p.is_touchdown()).filter_map(AnnotatedPlay::td_scorer).collect();
	assert_eq!(scorers, vec!["M.Andrews", "J.Dobbins"]);
	assert_eq!(log[12].score_kind(), Some(ScoreKind::ExtraPoint));
	assert_eq!(log[12].play.scores(&teams()), Some((7.0, 0.0)));
}

#[test]
fn test_box_score_skips_nullified_plays() {
	let log = annotated();
	let lines = box_score(&log);
	assert_eq!(lines["L.Jackson"].get(StatKind::PassYds), 46);
	assert_eq!(lines["L.Jackson"].get(StatKind::RushYds), -2);
	assert_eq!(lines["M.Andrews"].get(StatKind::RecTd), 1);
	assert_eq!(lines["J.Dobbins"].get(StatKind::RushYds), 35);
	assert!(!lines.contains_key("O.Brown"));
}

#[test]
fn test_annotation_is_idempotent() {
	assert_eq!(annotated(), annotated());
}
