use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::State;
use crate::error::ChainError;

/// Word-level transition graph of a fixed order.
///
/// The `TransitionGraph` maps every `order`-word context seen in a sequence
/// to its [`State`], which lists the words observed right after it.
///
/// # Responsibilities
/// - Build the graph from a (wrap-extended) token sequence in one pass
/// - Look up contexts and sample successors
/// - Measure the average branching factor
/// - Export to / import from JSON and a compact binary form
///
/// # Invariants
/// - `order` is always >= 1
/// - Every key has exactly `order` words
/// - Every state has at least one successor
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionGraph {
	order: usize,
	states: HashMap<Vec<String>, State>,
}

/// Serializable form of a graph, states sorted by key.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct GraphDump {
	pub order: usize,
	pub states: Vec<State>,
}

impl TransitionGraph {
	/// Builds the graph by sliding a window of `order + 1` words over
	/// `sequence` with stride 1.
	///
	/// The first `order` words of each window form the key, the last one is
	/// appended to the key's successors. Deterministic: the same input always
	/// yields the same graph, successors in the same order.
	///
	/// # Errors
	/// - `InvalidOrder` if `order == 0`.
	/// - `EmptyCorpus` if `sequence` holds fewer than `order + 1` words.
	pub fn build(sequence: &[String], order: usize) -> Result<Self, ChainError> {
		if order == 0 {
			return Err(ChainError::InvalidOrder(order));
		}
		if sequence.len() < order + 1 {
			return Err(ChainError::EmptyCorpus {
				tokens: sequence.len(),
				order,
				required: order + 1,
			});
		}

		let mut states: HashMap<Vec<String>, State> = HashMap::new();
		for window in sequence.windows(order + 1) {
			let (key, next) = window.split_at(order);
			// Avoid allocating the key when the state already exists
			match states.get_mut(key) {
				Some(state) => state.add_transition(&next[0]),
				None => {
					let mut state = State::new(key);
					state.add_transition(&next[0]);
					states.insert(key.to_vec(), state);
				}
			}
		}

		Ok(Self { order, states })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct states.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	/// Total number of recorded transitions across all states.
	pub fn transition_count(&self) -> usize {
		self.states.values().map(State::len).sum()
	}

	/// Average number of recorded successors per distinct state.
	///
	/// Returns `0.0` for an empty graph.
	pub fn branching_factor(&self) -> f64 {
		if self.states.is_empty() {
			return 0.0;
		}
		self.transition_count() as f64 / self.states.len() as f64
	}

	/// Returns the state for a context, if any.
	pub fn get(&self, context: &[String]) -> Option<&State> {
		self.states.get(context)
	}

	/// Iterates over all states in arbitrary order.
	pub fn states(&self) -> impl Iterator<Item = &State> {
		self.states.values()
	}

	/// Samples the next word for `context`.
	///
	/// Returns `None` if the context is unknown.
	pub fn predict<R: Rng + ?Sized>(&self, context: &[String], rng: &mut R) -> Option<&str> {
		self.states.get(context)?.predict(rng)
	}

	/// Snapshot of the graph with states sorted by key.
	pub fn to_dump(&self) -> GraphDump {
		let mut states: Vec<State> = self.states.values().cloned().collect();
		states.sort_by(|a, b| a.key().cmp(b.key()));
		GraphDump { order: self.order, states }
	}

	/// Rebuilds a graph from a dump, checking every invariant.
	pub fn from_dump(dump: GraphDump) -> Result<Self, ChainError> {
		if dump.order == 0 {
			return Err(ChainError::InvalidOrder(dump.order));
		}
		let mut states = HashMap::with_capacity(dump.states.len());
		for state in dump.states {
			if state.key().len() != dump.order {
				return Err(ChainError::Serialization(format!(
					"state {:?} has {} words, expected {}",
					state.key(),
					state.key().len(),
					dump.order
				)));
			}
			if state.is_empty() {
				return Err(ChainError::Serialization(format!("state {:?} has no successor", state.key())));
			}
			let key = state.key().to_vec();
			if states.contains_key(&key) {
				return Err(ChainError::Serialization(format!("duplicate state {key:?}")));
			}
			states.insert(key, state);
		}
		Ok(Self { order: dump.order, states })
	}

	/// Compact binary form (`postcard`). Identical graphs give identical bytes.
	pub fn to_bytes(&self) -> Result<Vec<u8>, ChainError> {
		Ok(postcard::to_stdvec(&self.to_dump())?)
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self, ChainError> {
		Self::from_dump(postcard::from_bytes(bytes)?)
	}

	/// Pretty-printed JSON form.
	pub fn to_json(&self) -> Result<String, ChainError> {
		Ok(serde_json::to_string_pretty(&self.to_dump())?)
	}

	pub fn from_json(json: &str) -> Result<Self, ChainError> {
		Self::from_dump(serde_json::from_str(json)?)
	}

	/// Writes the graph to `path`: JSON if the extension is `json`,
	/// binary otherwise.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ChainError> {
		let path = path.as_ref();
		if is_json(path) {
			std::fs::write(path, self.to_json()?)?;
		} else {
			std::fs::write(path, self.to_bytes()?)?;
		}
		log::info!("graph of order {} ({} states) written to {}", self.order, self.len(), path.display());
		Ok(())
	}

	/// Reads a graph written by [`TransitionGraph::save`].
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChainError> {
		let path = path.as_ref();
		if is_json(path) {
			Self::from_json(&std::fs::read_to_string(path)?)
		} else {
			Self::from_bytes(&std::fs::read(path)?)
		}
	}
}

fn is_json(path: &Path) -> bool {
	path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
