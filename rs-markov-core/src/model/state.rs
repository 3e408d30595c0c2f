use rand::Rng;

use serde::{Deserialize, Serialize};


/// Represents a state of the word chain.
///
/// A `State` corresponds to a fixed `order`-word context (`key`) and stores
/// every word observed right after it, in the order the corpus produced them.
///
/// Conceptually, this is a node in a Markov chain. Edges are not weighted
/// explicitly: a successor seen three times is stored three times, so a
/// uniform draw over the list reproduces the transition frequencies.
///
/// ## Invariants
/// - `successors` is never empty once the state is part of a graph
/// - Successors keep append order (no deduplication)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// Context words, exactly `order` of them.
	key: Vec<String>,
	/// Observed next words, with repetitions.
	/// Example: ["cat", "mat", "cat"]
	successors: Vec<String>,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(key: &[String]) -> Self {
		Self {
			key: key.to_vec(),
			successors: Vec::new(),
		}
	}

	/// Records one occurrence of `next_word` following this context.
	pub fn add_transition(&mut self, next_word: &str) {
		self.successors.push(next_word.to_owned());
	}

	pub fn key(&self) -> &[String] {
		&self.key
	}

	pub fn successors(&self) -> &[String] {
		&self.successors
	}

	/// Number of recorded transitions (not distinct successors).
	pub fn len(&self) -> usize {
		self.successors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.successors.is_empty()
	}

	/// Picks the next word with one uniform draw over recorded occurrences.
	///
	/// Returns `None` if the state has no transitions.
	pub fn predict<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.successors.is_empty() {
			return None;
		}
		let index = rng.random_range(0..self.successors.len());
		Some(self.successors[index].as_str())
	}
}
