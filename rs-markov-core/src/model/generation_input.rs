use crate::error::{MarkovError, Result};

/// Default ceiling on failed sentence attempts per call.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;
/// Default number of tokens walked before a sentence attempt is abandoned.
pub const DEFAULT_MAX_SENTENCE_TOKENS: usize = 200;

/// Parameters controlling a `Generator`.
///
/// # Responsibilities
/// - Hold the optional RNG seed for reproducible output
/// - Bound the work done by sentence generation so it always terminates
///
/// # Invariants
/// - `max_attempts` and `max_sentence_tokens` are always >= 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationInput {
	/// Seed for the random number generator; `None` draws a fresh one.
	pub rng_seed: Option<u64>,

	/// Failed sentence attempts tolerated before giving up.
	max_attempts: usize,

	/// Tokens walked in a single sentence attempt before it is dropped.
	max_sentence_tokens: usize,
}

impl Default for GenerationInput {
	fn default() -> Self {
		Self {
			rng_seed: None,
			max_attempts: DEFAULT_MAX_ATTEMPTS,
			max_sentence_tokens: DEFAULT_MAX_SENTENCE_TOKENS,
		}
	}
}

impl GenerationInput {
	/// Default parameters with a fixed RNG seed.
	pub fn seeded(rng_seed: u64) -> Self {
		Self { rng_seed: Some(rng_seed), ..Self::default() }
	}

	pub fn max_attempts(&self) -> usize {
		self.max_attempts
	}

	pub fn max_sentence_tokens(&self) -> usize {
		self.max_sentence_tokens
	}

	/// Sets the failed-attempt ceiling.
	///
	/// # Errors
	/// Returns an error if the value is 0.
	pub fn set_max_attempts(&mut self, max_attempts: usize) -> Result<()> {
		if max_attempts == 0 {
			return Err(MarkovError::InvalidValue("max_attempts must be >= 1".to_owned()));
		}
		self.max_attempts = max_attempts;
		Ok(())
	}

	/// Sets the per-sentence token budget.
	///
	/// # Errors
	/// Returns an error if the value is 0.
	pub fn set_max_sentence_tokens(&mut self, max_sentence_tokens: usize) -> Result<()> {
		if max_sentence_tokens == 0 {
			return Err(MarkovError::InvalidValue("max_sentence_tokens must be >= 1".to_owned()));
		}
		self.max_sentence_tokens = max_sentence_tokens;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_limits_are_rejected() {
		let mut input = GenerationInput::seeded(7);
		assert!(input.set_max_attempts(0).is_err());
		assert!(input.set_max_sentence_tokens(0).is_err());
		assert_eq!(input.max_attempts(), DEFAULT_MAX_ATTEMPTS);

		input.set_max_attempts(3).unwrap();
		assert_eq!(input.max_attempts(), 3);
		assert_eq!(input.rng_seed, Some(7));
	}
}
