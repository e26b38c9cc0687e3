use pbp_replay::possession::{drive_summary, drives};
use pbp_replay::{annotate_plays, parse_play, RawPlay, RosterLookup, TeamDescriptor, Teams};

fn main() {
	let teams = Teams::new(TeamDescriptor::new("NWE", "New England Patriots"), TeamDescriptor::new("TAM", "Tampa Bay Buccaneers"));
	let plays = vec![
		RawPlay::new("R.Succop kicks off 65 yards from TAM 35 to end zone, Touchback.").with_location("TAM 35"),
		RawPlay::new("T.Brady pass short left to J.Edelman to NWE 33 for 8 yards (D.White).").with_down(1, "10", "NWE 25"),
		RawPlay::new("S.Michel right tackle to NWE 41 for 8 yards (V.Vea).").with_down(2, "2", "NWE 33"),
		RawPlay::new("T.Brady sacked at NWE 34 for -7 yards (S.Barrett).").with_down(1, "10", "NWE 41"),
	];

	for play in &plays {
		println!("{:?}", parse_play(&play.detail));
	}

	let log = annotate_plays(&plays, &teams, &RosterLookup::new());
	for head in drives(&log) {
		if let Some(summary) = drive_summary(&log, head) {
			println!("{summary:?}");
		}
	}
}
