use std::collections::BTreeMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

/// Follower table of one context in the dictionary.
///
/// A `State` stores every token observed right after a given context,
/// together with how many times it was observed. Conceptually, this is a
/// node in a Markov chain where outgoing edges are weighted by their
/// number of observations.
///
/// Serialized transparently as `{ "follower": count, ... }`.
///
/// ## Responsibilities:
/// - Accumulate follower occurrences during parsing
/// - Pick the next token using weighted random sampling
/// - Merge with another state (ex. loading a saved dictionary)
///
/// ## Invariants
/// - Each follower occurrence count is strictly positive
/// - An empty state marks a terminal context
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct State {
	/// Outgoing transitions indexed by the next token.
	/// Example: { "ran." => 1, "barked." => 1 }
	transitions: BTreeMap<String, u64>,
}

impl State {
	/// Creates a new empty (terminal) state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `follower`.
	pub fn add_transition(&mut self, follower: &str) {
		self.add_occurrences(follower, 1);
	}

	/// Adds `occurrence` observations of `follower`.
	///
	/// A zero occurrence is ignored so that no follower ever exists with a
	/// count of 0. Counts saturate at `u64::MAX`.
	pub fn add_occurrences(&mut self, follower: &str, occurrence: u64) {
		if occurrence == 0 {
			return;
		}
		let count = self.transitions.entry(follower.to_owned()).or_insert(0);
		*count = count.saturating_add(occurrence);
	}

	/// Number of times `follower` was observed after this context.
	pub fn count(&self, follower: &str) -> u64 {
		self.transitions.get(follower).copied().unwrap_or(0)
	}

	/// Sum of every follower count, saturating at `u64::MAX`.
	pub fn total(&self) -> u64 {
		self.transitions.values().fold(0, |total: u64, occurrence| total.saturating_add(*occurrence))
	}

	/// Sum of every follower count, `None` if it does not fit in a `u64`.
	pub fn checked_total(&self) -> Option<u64> {
		self.transitions.values().try_fold(0, |total: u64, occurrence| total.checked_add(*occurrence))
	}

	/// Total this state would reach after merging `other`, `None` on
	/// overflow. When it fits, every summed follower count fits too.
	pub fn merged_total(&self, other: &Self) -> Option<u64> {
		other
			.transitions
			.values()
			.try_fold(self.checked_total()?, |total, occurrence| total.checked_add(*occurrence))
	}

	/// A terminal state has no recorded follower.
	pub fn is_terminal(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Number of distinct followers.
	pub fn len(&self) -> usize {
		self.transitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Iterates over `(follower, count)` in follower order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
		self.transitions.iter().map(|(k, v)| (k.as_str(), *v))
	}

	/// Picks a follower using weighted random sampling.
	///
	/// The probability of selecting a follower is proportional to its
	/// occurrence count: `P(f) = count(f) / total()`.
	///
	/// This method performs:
	/// - an O(n) scan over the transitions
	/// - a cumulative subtraction to select a bucket
	///
	/// Returns `None` if the state is terminal.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (follower, occurrence) in &self.transitions {
			if r < *occurrence {
				return Some(follower.as_str());
			}
			r -= occurrence;
		}

		// Unreachable while counts sum to `total`
		self.transitions.keys().next_back().map(String::as_str)
	}

	/// Merges another state into this one, summing follower counts.
	pub fn merge(&mut self, other: &Self) {
		for (follower, occurrence) in &other.transitions {
			self.add_occurrences(follower, *occurrence);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn transitions_accumulate() {
		let mut state = State::new();
		assert!(state.is_terminal());

		state.add_transition("a");
		state.add_transition("a");
		state.add_transition("b");
		state.add_occurrences("c", 0);

		assert_eq!(state.count("a"), 2);
		assert_eq!(state.count("b"), 1);
		assert_eq!(state.count("c"), 0);
		assert_eq!(state.len(), 2);
		assert_eq!(state.total(), 3);
	}

	#[test]
	fn terminal_state_predicts_nothing() {
		let mut rng = StdRng::seed_from_u64(1);
		assert_eq!(State::new().predict(&mut rng), None);
	}

	#[test]
	fn prediction_follows_counts() {
		let mut state = State::new();
		state.add_occurrences("A", 3);
		state.add_occurrences("B", 1);

		let mut rng = StdRng::seed_from_u64(42);
		let draws = 10_000;
		let hits = (0..draws).filter(|_| state.predict(&mut rng) == Some("A")).count();
		let frequency = hits as f64 / draws as f64;

		assert!((frequency - 0.75).abs() < 0.02, "frequency of A was {frequency}");
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = State::new();
		left.add_occurrences("x", 2);
		let mut right = State::new();
		right.add_occurrences("x", 3);
		right.add_occurrences("y", 1);

		left.merge(&right);

		assert_eq!(left.count("x"), 5);
		assert_eq!(left.count("y"), 1);
	}

	#[test]
	fn huge_counts_never_overflow() {
		let mut state = State::new();
		state.add_occurrences("b", 1 << 63);
		state.add_occurrences("c", 1 << 63);
		state.add_occurrences("c", u64::MAX);

		assert_eq!(state.count("c"), u64::MAX);
		assert_eq!(state.total(), u64::MAX);
		assert_eq!(state.checked_total(), None);

		let mut rng = StdRng::seed_from_u64(3);
		assert!(state.predict(&mut rng).is_some());
	}

	#[test]
	fn merged_total_detects_overflow() {
		let mut left = State::new();
		left.add_occurrences("b", 1);
		let mut right = State::new();
		right.add_occurrences("b", u64::MAX);

		assert_eq!(left.merged_total(&right), None);
		assert_eq!(left.merged_total(&left), Some(2));
	}

	#[test]
	fn serializes_as_plain_object() {
		let mut state = State::new();
		state.add_occurrences("ran.", 1);
		state.add_occurrences("barked.", 2);

		let json = serde_json::to_string(&state).unwrap();
		assert_eq!(json, r#"{"barked.":2,"ran.":1}"#);
	}
}
