use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "Replays a play-by-play log and settles wagers against it", long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log level
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,

	/// Game JSON: teams, quarter-keyed play-by-play, starters and season tables
	#[arg(short, long, env = "GAME_FILE", value_name = "FILE")]
	pub game: PathBuf,

	/// Write output here instead of stdout
	#[arg(short, long, env = "OUTPUT_FILE", value_name = "FILE")]
	pub output: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
	/// Print the annotated play log
	Annotate,
	/// Grade a wager file against the game
	Grade {
		/// JSON array of wagers
		#[arg(short, long, env = "BETS_FILE", value_name = "FILE")]
		bets: PathBuf,

		/// Also report per-play impact and live yardage progress
		#[arg(long)]
		timeline: bool,
	},
	/// Per-player totals from the play log
	BoxScore,
	/// One summary per drive
	Drives,
}
