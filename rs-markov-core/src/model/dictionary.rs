use std::collections::BTreeMap;

use log::debug;

use super::state::State;
use crate::error::{MarkovError, Result};
use crate::io::read_file;

/// Smallest accepted context depth.
pub const MIN_DEPTH: usize = 1;
/// Largest accepted context depth.
pub const MAX_DEPTH: usize = 9;

/// Word-level n-gram dictionary.
///
/// The `Dictionary` maps every context of exactly `depth` tokens (joined
/// by single spaces) to the `State` holding the tokens observed right
/// after it.
///
/// # Responsibilities
/// - Build the dictionary from raw text, additively
/// - Record terminal contexts where the corpus ends
/// - Merge with another dictionary of the same depth
/// - Give read access to the generator and the stores
///
/// # Invariants
/// - `depth` is always within `MIN_DEPTH..=MAX_DEPTH`
/// - Keys built by `parse` are exactly `depth` tokens joined by `' '`
/// - All follower counts are >= 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dictionary {
	/// Number of tokens in a context key.
	depth: usize,

	/// Mapping from a context key to its followers.
	entries: BTreeMap<String, State>,
}

impl Dictionary {
	/// Creates an empty dictionary.
	///
	/// # Errors
	/// Returns `InvalidValue` if `depth` is outside `[1, 9]`.
	pub fn new(depth: usize) -> Result<Self> {
		if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
			return Err(MarkovError::InvalidValue(format!(
				"depth must be between {MIN_DEPTH} and {MAX_DEPTH}, got {depth}"
			)));
		}
		Ok(Self { depth, entries: BTreeMap::new() })
	}

	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Number of contexts, terminal ones included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn contains(&self, context: &str) -> bool {
		self.entries.contains_key(context)
	}

	/// Followers of `context`, `None` if the context was never seen.
	pub fn followers(&self, context: &str) -> Option<&State> {
		self.entries.get(context)
	}

	/// Iterates over every context key in order.
	pub fn contexts(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Raw read access to the whole mapping.
	pub fn entries(&self) -> &BTreeMap<String, State> {
		&self.entries
	}

	/// Records one occurrence of `follower` after `context`.
	///
	/// Both levels are created if absent.
	pub fn add_word(&mut self, context: &str, follower: &str) {
		self.entries.entry(context.to_owned()).or_default().add_transition(follower);
	}

	/// Tokenizes `text` and counts every window of `depth + 1` tokens.
	///
	/// # Notes
	/// - Tokens are whitespace-separated; punctuation stays attached.
	/// - The last `depth` tokens are registered as a terminal context only
	///   when that context is not known yet.
	/// - Parsing the same text twice doubles every count.
	pub fn parse(&mut self, text: &str) {
		let tokens: Vec<&str> = text.split_whitespace().collect();
		if tokens.len() < self.depth {
			// Not even one full context
			return;
		}

		for window in tokens.windows(self.depth + 1) {
			let (context, follower) = window.split_at(self.depth);
			self.add_word(&context.join(" "), follower[0]);
		}

		let tail = tokens[tokens.len() - self.depth..].join(" ");
		self.entries.entry(tail).or_default();

		debug!("Parsed {} tokens, dictionary now holds {} contexts", tokens.len(), self.entries.len());
	}

	/// Parses `source`, reading it as a file path when `as_file` is set.
	///
	/// # Errors
	/// Returns `Io` if `as_file` is set and the file cannot be read.
	pub fn parse_source(&mut self, source: &str, as_file: bool) -> Result<()> {
		if as_file {
			let text = read_file(source).map_err(|e| MarkovError::io(source, e))?;
			self.parse(&text);
		} else {
			self.parse(source);
		}
		Ok(())
	}

	/// Removes every context; the depth is kept.
	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// Merges another dictionary into this one.
	///
	/// Follower counts are summed. A terminal context of `other` is only
	/// added when this dictionary does not know the context yet.
	///
	/// # Notes
	/// - Every context is checked before anything is merged, so on error
	///   this dictionary is left unchanged.
	///
	/// # Errors
	/// Returns `InvalidValue` if the depths do not match, or if the follower
	/// counts of a context would no longer fit in a `u64` once summed.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.depth != other.depth {
			return Err(MarkovError::InvalidValue(format!(
				"depth mismatch: {} vs {}",
				self.depth, other.depth
			)));
		}

		for (context, state) in &other.entries {
			let merged_total = match self.entries.get(context) {
				Some(existing) => existing.merged_total(state),
				None => state.checked_total(),
			};
			if merged_total.is_none() {
				return Err(MarkovError::InvalidValue(format!("follower counts of {context:?} overflow")));
			}
		}

		for (context, state) in &other.entries {
			self.entries.entry(context.clone()).or_default().merge(state);
		}
		Ok(())
	}

	/// Builds a dictionary from a raw `context → follower → count` mapping.
	///
	/// Keys are taken as they are, so whatever `add_word` recorded and
	/// `save` wrote is read back unchanged.
	pub(crate) fn from_counts(depth: usize, counts: BTreeMap<String, BTreeMap<String, u64>>) -> Result<Self> {
		let mut dictionary = Self::new(depth)?;

		for (context, followers) in counts {
			let state = dictionary.entries.entry(context).or_default();
			for (follower, count) in followers {
				state.add_occurrences(&follower, count);
			}
		}

		Ok(dictionary)
	}
}
