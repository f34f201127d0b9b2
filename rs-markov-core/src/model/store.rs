use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::dictionary::Dictionary;
use crate::error::{MarkovError, Result};
use crate::io::{self, DICTIONARY_SUFFIX};

/// Backend a dictionary lives in.
///
/// A backend only decides where the dictionary comes from when it is
/// opened; persisting is specific to the file backend.
pub trait Storage {
	/// Fills a freshly created `dictionary` from the backend.
	fn open(&self, dictionary: &mut Dictionary) -> Result<()>;
}

/// Dictionary kept in memory only, gone with the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Memory;

impl Storage for Memory {
	fn open(&self, _dictionary: &mut Dictionary) -> Result<()> {
		Ok(())
	}
}

/// Dictionary stored in a JSON file.
///
/// The file holds `{ "context": { "follower": count } }`. Its path always
/// ends with `.markov.json` so that deleting a store can never remove an
/// unrelated file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileStore {
	path: PathBuf,
}

impl FileStore {
	/// Creates a store for `path`, appending the suffix if missing.
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		Self { path: io::with_suffix(path, DICTIONARY_SUFFIX) }
	}

	/// Suffixed path of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Merges the file content into `dictionary`, adding counts.
	///
	/// # Behavior
	/// - A missing file leaves the dictionary untouched and is not an error.
	/// - The whole file is decoded and validated before anything is merged,
	///   so a failure leaves `dictionary` exactly as it was.
	///
	/// # Errors
	/// - `Io` if the file exists but cannot be read.
	/// - `Malformed` if it is not an object of objects of non-negative
	///   integers, or if a context's summed counts would overflow.
	pub fn load(&self, dictionary: &mut Dictionary) -> Result<()> {
		let bytes = match fs::read(&self.path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => {
				debug!("No dictionary file at {}, starting empty", self.path.display());
				return Ok(());
			}
			Err(e) => return Err(MarkovError::io(&self.path, e)),
		};

		let counts: BTreeMap<String, BTreeMap<String, u64>> =
			serde_json::from_slice(&bytes).map_err(|e| MarkovError::malformed(&self.path, e))?;
		let loaded = Dictionary::from_counts(dictionary.depth(), counts)?;
		dictionary.merge(&loaded).map_err(|e| MarkovError::malformed(&self.path, e))?;

		info!("Loaded {} contexts from {}", loaded.len(), self.path.display());
		Ok(())
	}

	/// Writes the whole dictionary to the backing file.
	///
	/// The file is replaced atomically: a crash mid-write keeps the previous
	/// content.
	pub fn save(&self, dictionary: &Dictionary) -> Result<()> {
		let bytes =
			serde_json::to_vec_pretty(dictionary.entries()).map_err(|e| MarkovError::malformed(&self.path, e))?;
		io::write_atomic(&self.path, &bytes).map_err(|e| MarkovError::io(&self.path, e))?;

		info!("Saved {} contexts to {}", dictionary.len(), self.path.display());
		Ok(())
	}
}

impl Storage for FileStore {
	fn open(&self, dictionary: &mut Dictionary) -> Result<()> {
		self.load(dictionary)
	}
}

/// What `delete` should remove: a path (suffixed if needed) or a store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeleteTarget(PathBuf);

impl DeleteTarget {
	pub fn path(&self) -> &Path {
		&self.0
	}
}

impl From<&str> for DeleteTarget {
	fn from(path: &str) -> Self {
		Self(io::with_suffix(path, DICTIONARY_SUFFIX))
	}
}

impl From<&Path> for DeleteTarget {
	fn from(path: &Path) -> Self {
		Self(io::with_suffix(path, DICTIONARY_SUFFIX))
	}
}

impl From<PathBuf> for DeleteTarget {
	fn from(path: PathBuf) -> Self {
		Self::from(path.as_path())
	}
}

impl From<&FileStore> for DeleteTarget {
	fn from(store: &FileStore) -> Self {
		Self(store.path.clone())
	}
}

/// Removes the backing file of a dictionary.
///
/// # Errors
/// - `NotFound` if there is no such file.
/// - `Io` if it exists but cannot be removed.
pub fn delete<T: Into<DeleteTarget>>(target: T) -> Result<()> {
	let target = target.into();
	match fs::remove_file(target.path()) {
		Ok(()) => {
			info!("Deleted {}", target.path().display());
			Ok(())
		}
		Err(e) if e.kind() == ErrorKind::NotFound => Err(MarkovError::NotFound(target.0)),
		Err(e) => Err(MarkovError::io(target.0, e)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn store_path_is_suffixed() {
		assert_eq!(FileStore::new("data/corpus").path(), Path::new("data/corpus.markov.json"));
		assert_eq!(FileStore::new("data/corpus.markov.json").path(), Path::new("data/corpus.markov.json"));
	}

	#[test]
	fn delete_targets_share_the_suffix_rule() {
		let store = FileStore::new("a/b");
		assert_eq!(DeleteTarget::from("a/b"), DeleteTarget::from(&store));
		assert_eq!(DeleteTarget::from(PathBuf::from("a/b.markov.json")), DeleteTarget::from(&store));
	}

	#[test]
	fn memory_open_is_a_no_op() {
		let mut dictionary = Dictionary::new(1).unwrap();
		Memory.open(&mut dictionary).unwrap();
		assert!(dictionary.is_empty());
	}
}
