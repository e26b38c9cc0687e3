use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraderError {
	#[error("Failed to read {path}: {source}")]
	Read { path: PathBuf, source: std::io::Error },

	#[error("Failed to write {path}: {source}")]
	Write { path: PathBuf, source: std::io::Error },

	#[error("Invalid JSON in {path}: {source}")]
	InvalidJson { path: PathBuf, source: serde_json::Error },

	#[error("Failed to serialize output: {0}")]
	Serialize(#[from] serde_json::Error),

	#[error("Invalid log filter: {0}")]
	LogFilter(String),
}

impl GraderError {
	pub fn read(path: &std::path::Path, source: std::io::Error) -> Self {
		GraderError::Read {
			path: path.to_path_buf(),
			source,
		}
	}

	pub fn invalid_json(path: &std::path::Path, source: serde_json::Error) -> Self {
		GraderError::InvalidJson {
			path: path.to_path_buf(),
			source,
		}
	}
}
