use log::{debug, warn};
use rand::SeedableRng;
use rand::prelude::IteratorRandom;
use rand::rngs::StdRng;

use super::dictionary::Dictionary;
use super::generation_input::GenerationInput;
use crate::error::{MarkovError, Result};

/// Weighted random walker over a `Dictionary`.
///
/// # Responsibilities
/// - Pick starting contexts (seeded, uniform, or sentence-like)
/// - Sample followers proportionally to their counts
/// - Slide the context window and restart on terminal contexts
/// - Assemble whole sentences within a bounded number of attempts
///
/// The dictionary is only borrowed immutably: several generators may walk
/// the same snapshot at once, none of them can alter it.
#[derive(Debug)]
pub struct Generator<'a> {
	dictionary: &'a Dictionary,
	input: GenerationInput,
	rng: StdRng,
}

impl<'a> Generator<'a> {
	/// Creates a generator over `dictionary`.
	///
	/// The RNG is seeded from `input.rng_seed` when set, otherwise from the
	/// thread RNG.
	pub fn new(dictionary: &'a Dictionary, input: GenerationInput) -> Self {
		let rng = match input.rng_seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_rng(&mut rand::rng()),
		};
		Self { dictionary, input, rng }
	}

	pub fn input(&self) -> &GenerationInput {
		&self.input
	}

	/// Generates exactly `count` tokens joined by spaces.
	///
	/// # Parameters
	/// - `count`: number of tokens to emit; 0 yields an empty string.
	/// - `seed`: starting context, used only if the dictionary knows it.
	///
	/// # Behavior
	/// - Emitted tokens are followers only; the starting context is not part
	///   of the output.
	/// - A terminal context is replaced by a uniformly drawn context.
	///
	/// # Errors
	/// - `EmptyDictionary` if there is no context at all.
	/// - `InsufficientCorpus` if every context is terminal.
	pub fn generate_words(&mut self, count: usize, seed: Option<&str>) -> Result<String> {
		if count == 0 {
			return Ok(String::new());
		}
		if self.dictionary.is_empty() {
			return Err(MarkovError::EmptyDictionary);
		}
		if self.dictionary.entries().values().all(|state| state.is_terminal()) {
			return Err(MarkovError::InsufficientCorpus { requested: count, completed: 0 });
		}

		let mut window = match self.known_context(seed) {
			Some(context) => split(context),
			None => split(self.random_context()?),
		};

		let mut words: Vec<&'a str> = Vec::with_capacity(count);
		while words.len() < count {
			match self.step(&window) {
				Some(next) => {
					words.push(next);
					slide(&mut window, next);
				}
				None => window = split(self.random_context()?),
			}
		}

		Ok(words.join(" "))
	}

	/// Generates `count` sentences joined by single spaces.
	///
	/// A sentence starts with a token whose first character is uppercase
	/// and ends with a token whose last character is `.`, `!` or `?`.
	///
	/// # Parameters
	/// - `count`: number of sentences; 0 yields an empty string.
	/// - `seed`: starting context of the first sentence, if known.
	///
	/// # Behavior
	/// - Each sentence starts from a context whose first token is
	///   capitalised; without any, from any context.
	/// - Tokens walked before the first capitalised one are skipped.
	/// - A terminal context, or `max_sentence_tokens` steps without an end
	///   mark, abandons the attempt.
	///
	/// # Errors
	/// - `EmptyDictionary` if there is no context at all.
	/// - `InsufficientCorpus` after `max_attempts` abandoned attempts.
	pub fn generate_sentences(&mut self, count: usize, seed: Option<&str>) -> Result<String> {
		if count == 0 {
			return Ok(String::new());
		}
		if self.dictionary.is_empty() {
			return Err(MarkovError::EmptyDictionary);
		}

		let mut seed = self.known_context(seed);
		let mut sentences: Vec<String> = Vec::with_capacity(count);
		let mut failures = 0;

		while sentences.len() < count {
			if failures >= self.input.max_attempts() {
				return Err(MarkovError::InsufficientCorpus { requested: count, completed: sentences.len() });
			}

			let start = match seed.take() {
				Some(context) => context,
				None => self.sentence_start()?,
			};

			match self.walk_sentence(start) {
				Some(sentence) => sentences.push(sentence),
				None => {
					failures += 1;
					warn!("Sentence attempt from {start:?} abandoned ({failures} failed so far)");
				}
			}
		}

		Ok(sentences.join(" "))
	}

	/// Returns the dictionary's own copy of `seed` if it is a known context.
	fn known_context(&self, seed: Option<&str>) -> Option<&'a str> {
		let dictionary = self.dictionary;
		let (context, _) = dictionary.entries().get_key_value(seed?)?;
		debug!("Starting from seed context {context:?}");
		Some(context.as_str())
	}

	/// Draws a context uniformly among all contexts.
	fn random_context(&mut self) -> Result<&'a str> {
		let dictionary = self.dictionary;
		dictionary.contexts().choose(&mut self.rng).ok_or(MarkovError::EmptyDictionary)
	}

	/// Draws a context uniformly among the capitalised ones, falling back to
	/// any context when there are none.
	fn sentence_start(&mut self) -> Result<&'a str> {
		let dictionary = self.dictionary;
		let capitalised = dictionary.contexts().filter(|context| starts_sentence(context)).choose(&mut self.rng);

		match capitalised {
			Some(context) => Ok(context),
			None => {
				warn!("No context starts with an uppercase letter, starting anywhere");
				self.random_context()
			}
		}
	}

	/// Samples the follower of the current window.
	///
	/// Returns `None` on a terminal (or unknown) context.
	fn step(&mut self, window: &[&'a str]) -> Option<&'a str> {
		let dictionary = self.dictionary;
		dictionary.followers(&window.join(" "))?.predict(&mut self.rng)
	}

	/// Walks from `start` until one sentence is complete.
	///
	/// Returns `None` if the walk hits a terminal context or runs out of
	/// token budget first.
	fn walk_sentence(&mut self, start: &'a str) -> Option<String> {
		let mut sentence: Vec<&'a str> = Vec::new();
		let mut window = split(start);

		for &token in &window {
			if push_token(&mut sentence, token) {
				return Some(sentence.join(" "));
			}
		}

		for _ in 0..self.input.max_sentence_tokens() {
			let next = self.step(&window)?;
			slide(&mut window, next);
			if push_token(&mut sentence, next) {
				return Some(sentence.join(" "));
			}
		}

		None
	}
}

fn split(context: &str) -> Vec<&str> {
	context.split(' ').collect()
}

/// Drops the leading token and appends `next`.
fn slide<'a>(window: &mut Vec<&'a str>, next: &'a str) {
	window.remove(0);
	window.push(next);
}

fn starts_sentence(token: &str) -> bool {
	token.chars().next().is_some_and(char::is_uppercase)
}

fn ends_sentence(token: &str) -> bool {
	matches!(token.chars().last(), Some('.' | '!' | '?'))
}

/// Adds `token` to the sentence being built, skipping tokens until one can
/// open a sentence. Returns true once the sentence is closed.
fn push_token<'a>(sentence: &mut Vec<&'a str>, token: &'a str) -> bool {
	if sentence.is_empty() && !starts_sentence(token) {
		return false;
	}
	sentence.push(token);
	ends_sentence(token)
}
