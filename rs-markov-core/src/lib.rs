//! Markov dictionary text generation library.
//!
//! This crate builds a word-level n-gram model from text and uses it to
//! generate pseudo-random text that locally mimics the corpus:
//! - Additive n-gram counting with a configurable depth (1 to 9)
//! - JSON persistence with additive merge-on-load and atomic save
//! - Frequency-weighted generation of words or whole sentences
//!
//! ```no_run
//! use rs_markov_core::{PersistentDictionary, delete};
//!
//! let mut markov = PersistentDictionary::open("data/tales", 2)?;
//! markov.parse("The dog ran. The dog barked.", false)?;
//! println!("{}", markov.generate_sentences(1, None)?);
//! markov.save()?;
//! delete(&markov)?;
//! # Ok::<(), rs_markov_core::MarkovError>(())
//! ```

/// Dictionary model, storage and generation.
pub mod model;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file reading, suffixed paths, atomic writes).
///
/// Not exposed
pub(crate) mod io;

pub use error::{MarkovError, Result};
pub use model::dictionary::Dictionary;
pub use model::generation_input::GenerationInput;
pub use model::generator::Generator;
pub use model::markov::{Markov, PersistentDictionary, TemporaryDictionary};
pub use model::state::State;
pub use model::store::{DeleteTarget, FileStore, Memory, Storage, delete};
