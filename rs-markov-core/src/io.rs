use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Suffix every file-backed dictionary carries.
pub(crate) const DICTIONARY_SUFFIX: &str = ".markov.json";

/// Reads a whole text file into memory.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Appends `suffix` to the file name unless it already ends with it.
///
/// Example:
/// `data/corpus` + `".markov.json"` → `data/corpus.markov.json`
/// `data/corpus.markov.json` is returned unchanged.
pub(crate) fn with_suffix<P: AsRef<Path>>(input_path: P, suffix: &str) -> PathBuf {
	let input_path = input_path.as_ref();
	if input_path.as_os_str().to_string_lossy().ends_with(suffix) {
		return input_path.to_path_buf();
	}

	let mut raw = input_path.as_os_str().to_owned();
	raw.push(suffix);
	PathBuf::from(raw)
}

/// Writes `bytes` to `path` without ever exposing a partially written file.
///
/// The content goes to a sibling `.tmp` file first, is flushed to disk,
/// then renamed over the destination. A failure at any point leaves the
/// previous file untouched.
pub(crate) fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> io::Result<()> {
	let path = path.as_ref();
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}

	let mut tmp = path.as_os_str().to_owned();
	tmp.push(".tmp");
	let tmp = PathBuf::from(tmp);

	let result = (|| -> io::Result<()> {
		let mut file = File::create(&tmp)?;
		file.write_all(bytes)?;
		file.sync_all()?;
		fs::rename(&tmp, path)
	})();

	if result.is_err() {
		// Best effort cleanup
		let _ = fs::remove_file(&tmp);
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn suffix_is_appended_once() {
		assert_eq!(with_suffix("data/corpus", DICTIONARY_SUFFIX), PathBuf::from("data/corpus.markov.json"));
		assert_eq!(
			with_suffix("data/corpus.markov.json", DICTIONARY_SUFFIX),
			PathBuf::from("data/corpus.markov.json")
		);
		assert_eq!(with_suffix("notes.json", DICTIONARY_SUFFIX), PathBuf::from("notes.json.markov.json"));
	}

	#[test]
	fn atomic_write_replaces_content_and_cleans_up() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("out.markov.json");

		write_atomic(&path, b"first").unwrap();
		write_atomic(&path, b"second").unwrap();

		assert_eq!(read_file(&path).unwrap(), "second");
		assert!(!dir.path().join("nested").join("out.markov.json.tmp").exists());
	}
}
