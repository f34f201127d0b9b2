use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarkovError>;

/// Every failure the dictionary, its stores and the generator can report.
#[derive(Error, Debug)]
pub enum MarkovError {
	/// A parameter is outside its accepted range (depth, retry ceilings...).
	#[error("Invalid value: {0}")]
	InvalidValue(String),

	/// The file exists but could not be read or written.
	#[error("IO error on {}: {}", .path.display(), .source)]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The file was read but its content is not a dictionary of this depth.
	#[error("Malformed dictionary file {}: {}", .path.display(), .reason)]
	Malformed { path: PathBuf, reason: String },

	#[error("Nothing to delete at {}", .0.display())]
	NotFound(PathBuf),

	#[error("Dictionary has no context to start from")]
	EmptyDictionary,

	/// The corpus cannot produce the requested output within the retry budget.
	#[error("Corpus too poor: produced {completed} of {requested} requested")]
	InsufficientCorpus { requested: usize, completed: usize },
}

impl MarkovError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}

	pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
		Self::Malformed { path: path.into(), reason: reason.to_string() }
	}
}
