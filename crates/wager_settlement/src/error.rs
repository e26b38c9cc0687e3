use thiserror::Error;

/// Why a wager could not be read into a gradeable shape.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WagerError {
	#[error("Unknown market: {market}")]
	UnknownMarket { market: String },

	#[error("Unknown {market} market: {kind}")]
	UnsupportedType { market: String, kind: String },

	#[error("Wager has no selection")]
	MissingSelection,

	#[error("Invalid threshold: {input}")]
	InvalidThreshold { input: String },

	#[error("Missing over/under side")]
	MissingSide,
}

impl WagerError {
	pub fn invalid_threshold(input: Option<&str>) -> Self {
		WagerError::InvalidThreshold {
			input: input.unwrap_or_default().to_string(),
		}
	}

	pub fn unsupported_type(market: &str, kind: &str) -> Self {
		WagerError::UnsupportedType {
			market: market.to_string(),
			kind: kind.to_string(),
		}
	}
}
