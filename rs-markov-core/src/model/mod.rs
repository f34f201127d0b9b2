//! Top-level module for the Markov dictionary system.
//!
//! This module provides a word-level n-gram text generator, including:
//! - The context → follower → count model (`Dictionary`)
//! - Per-context follower tables (`State`)
//! - In-memory and file-backed storage (`store`)
//! - A facade binding a dictionary to its storage (`Markov`)
//! - Generation configuration (`GenerationInput`)
//! - Weighted random generation of words and sentences (`Generator`)

/// Word-level n-gram dictionary of a fixed depth.
///
/// Handles tokenization, additive counting, terminal contexts
/// and merging.
pub mod dictionary;

/// Weighted random walks over a dictionary.
///
/// Produces a number of words or a number of whole sentences,
/// optionally reproducible through a fixed RNG seed.
pub mod generator;

/// Generation parameters (RNG seed, retry ceilings).
pub mod generation_input;

/// Dictionary bound to its backend, the main entry point.
pub mod markov;

/// Follower table of a single context.
///
/// Tracks follower counts and supports weighted random sampling.
pub mod state;

/// Storage backends and deletion of persisted dictionaries.
///
/// Loading merges additively and atomically, saving replaces
/// the file atomically.
pub mod store;
