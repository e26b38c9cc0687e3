use crate::error::PlayTextError;
use crate::patterns::SACK;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

static NO_GAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bno gain\b").unwrap());
static FOR_MINUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bfor\s*-+\s*(\d+)\s*yards?\b").unwrap());
static LOSS_OF: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)\b(?:for\s+(?:a\s+)?loss\s+of|for)\s*-?\s*(\d+)\s*yards?\b").unwrap());
static LOSS_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bloss\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YardType {
	Gain,
	Loss,
	NoGain,
}

/// Yardage read out of a play description, kept unsigned with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Yards {
	pub value: u8,
	pub yard_type: YardType,
}

impl Yards {
	pub fn new(value: u8, yard_type: YardType) -> Self {
		if value == 0 {
			return Self {
				value,
				yard_type: YardType::NoGain,
			};
		}
		Self { value, yard_type }
	}

	pub fn signed(&self) -> i32 {
		match self.yard_type {
			YardType::Gain => i32::from(self.value),
			YardType::Loss => -i32::from(self.value),
			YardType::NoGain => 0,
		}
	}
}

impl FromStr for Yards {
	type Err = PlayTextError;

	/// Precedence: "no gain", then an explicit "for -N", then "loss of N" or a
	/// sack, then a plain "for N yards".
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if NO_GAIN.is_match(s) {
			return Ok(Yards::new(0, YardType::NoGain));
		}

		if let Some(caps) = FOR_MINUS.captures(s) {
			let value = caps[1].parse::<u8>().map_err(|_| PlayTextError::no_yards_info(s))?;
			return Ok(Yards::new(value, YardType::Loss));
		}

		if let Some(caps) = LOSS_OF.captures(s) {
			let value = caps[1].parse::<u8>().map_err(|_| PlayTextError::no_yards_info(s))?;
			let yard_type = if LOSS_WORD.is_match(s) || SACK.is_match(s) {
				YardType::Loss
			} else {
				YardType::Gain
			};
			return Ok(Yards::new(value, yard_type));
		}

		Err(PlayTextError::no_yards_info(s))
	}
}

/// Signed yardage of a play, `None` when the text carries none.
pub fn signed_yards(detail: &str) -> Option<i32> {
	detail.parse::<Yards>().ok().map(|y| y.signed())
}
