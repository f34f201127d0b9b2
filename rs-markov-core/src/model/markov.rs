use std::path::Path;

use super::dictionary::Dictionary;
use super::generation_input::GenerationInput;
use super::generator::Generator;
use super::store::{DeleteTarget, FileStore, Memory, Storage};
use crate::error::Result;

/// A dictionary bound to the backend it lives in.
///
/// The same model serves every backend; only `S` changes:
/// - `TemporaryDictionary` keeps everything in memory
/// - `PersistentDictionary` loads from and saves to a `.markov.json` file
///
/// Parsing and clearing mutate the dictionary, generation only reads it.
#[derive(Clone, Debug)]
pub struct Markov<S: Storage = Memory> {
	dictionary: Dictionary,
	storage: S,
}

/// In-memory dictionary.
pub type TemporaryDictionary = Markov<Memory>;

/// File-backed dictionary.
pub type PersistentDictionary = Markov<FileStore>;

impl Markov<Memory> {
	/// Creates an empty in-memory dictionary.
	///
	/// # Errors
	/// Returns `InvalidValue` if `depth` is outside `[1, 9]`.
	pub fn new(depth: usize) -> Result<Self> {
		Self::with_storage(depth, Memory)
	}
}

impl Markov<FileStore> {
	/// Opens the dictionary stored at `path` (suffix appended if missing).
	///
	/// A missing file yields an empty dictionary.
	///
	/// # Errors
	/// - `InvalidValue` if `depth` is outside `[1, 9]`.
	/// - `Io` / `Malformed` if the file exists but cannot be loaded.
	pub fn open<P: AsRef<Path>>(path: P, depth: usize) -> Result<Self> {
		Self::with_storage(depth, FileStore::new(path))
	}

	/// Suffixed path of the backing file.
	pub fn path(&self) -> &Path {
		self.storage.path()
	}

	/// Merges the backing file into the current dictionary again.
	///
	/// All-or-nothing: on error the dictionary is left unchanged.
	pub fn load(&mut self) -> Result<()> {
		self.storage.load(&mut self.dictionary)
	}

	/// Atomically writes the dictionary to its backing file.
	pub fn save(&self) -> Result<()> {
		self.storage.save(&self.dictionary)
	}
}

impl<S: Storage> Markov<S> {
	/// Creates a dictionary of `depth` and fills it from `storage`.
	pub fn with_storage(depth: usize, storage: S) -> Result<Self> {
		let mut dictionary = Dictionary::new(depth)?;
		storage.open(&mut dictionary)?;
		Ok(Self { dictionary, storage })
	}

	/// Read access to the underlying dictionary.
	pub fn dictionary(&self) -> &Dictionary {
		&self.dictionary
	}

	pub fn storage(&self) -> &S {
		&self.storage
	}

	pub fn depth(&self) -> usize {
		self.dictionary.depth()
	}

	/// Ingests corpus text, or the content of the file `source` names when
	/// `as_file` is set.
	pub fn parse(&mut self, source: &str, as_file: bool) -> Result<()> {
		self.dictionary.parse_source(source, as_file)
	}

	/// Records one occurrence of `follower` after `context`.
	pub fn add_word(&mut self, context: &str, follower: &str) {
		self.dictionary.add_word(context, follower);
	}

	/// Removes every context. The backing file, if any, is untouched until
	/// the next save.
	pub fn clear(&mut self) {
		self.dictionary.clear();
	}

	/// Builds a generator with custom parameters over this dictionary.
	pub fn generator(&self, input: GenerationInput) -> Generator<'_> {
		Generator::new(&self.dictionary, input)
	}

	/// Generates `count` words with default parameters.
	pub fn generate_words(&self, count: usize, seed: Option<&str>) -> Result<String> {
		self.generator(GenerationInput::default()).generate_words(count, seed)
	}

	/// Generates `count` sentences with default parameters.
	pub fn generate_sentences(&self, count: usize, seed: Option<&str>) -> Result<String> {
		self.generator(GenerationInput::default()).generate_sentences(count, seed)
	}
}

impl From<&PersistentDictionary> for DeleteTarget {
	fn from(dictionary: &PersistentDictionary) -> Self {
		DeleteTarget::from(&dictionary.storage)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::MarkovError;

	#[test]
	fn depth_is_validated_for_both_backends() {
		assert!(matches!(TemporaryDictionary::new(0), Err(MarkovError::InvalidValue(_))));
		assert!(matches!(PersistentDictionary::open("unused", 10), Err(MarkovError::InvalidValue(_))));
	}

	#[test]
	fn temporary_dictionary_parses_and_generates() {
		let mut markov = TemporaryDictionary::new(2).unwrap();
		markov.parse("The dog ran. The dog barked.", false).unwrap();

		let followers = markov.dictionary().followers("The dog").unwrap();
		assert_eq!(followers.count("ran."), 1);
		assert_eq!(followers.count("barked."), 1);

		let sentence = markov.generate_sentences(1, None).unwrap();
		assert!(sentence.starts_with("The"));
		assert!(sentence.ends_with('.'));

		markov.clear();
		assert!(matches!(markov.generate_words(1, None), Err(MarkovError::EmptyDictionary)));
	}
}
