use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
	#[error("Empty location")]
	Empty,

	#[error("Unrecognized location format: {input}")]
	InvalidFormat { input: String },

	#[error("Yard line {yard} is outside 0..=50")]
	YardOutOfRange { yard: u8 },

	#[error("Parse error occurred for yard line: {source}")]
	ParseError {
		#[from]
		source: ParseIntError,
	},
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayTextError {
	#[error("Play was nullified: {input}")]
	NoPlay { input: String },

	#[error("No yardage information found in: {input}")]
	NoYardsInfo { input: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TeamError {
	#[error("Team {code} is neither the home nor the away team")]
	UnknownTeam { code: String },
}

impl LocationError {
	pub fn invalid_format_error(input: &str) -> Self {
		LocationError::InvalidFormat { input: input.to_string() }
	}
}

impl PlayTextError {
	pub fn no_yards_info(input: &str) -> Self {
		PlayTextError::NoYardsInfo { input: input.to_string() }
	}

	pub fn no_play(input: &str) -> Self {
		PlayTextError::NoPlay { input: input.to_string() }
	}
}
