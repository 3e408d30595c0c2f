//! Word-level Markov chain.
//!
//! - Graph nodes (`State`)
//! - Fixed-order transition graphs (`TransitionGraph`)
//! - Quality bands for the order search (`Quality`, `QualityThresholds`)
//! - The high-level model: training, order search, sampling (`ChainModel`)
//! - Lifecycle hooks (`ChainObserver`)

/// Train / search / generate entry point.
pub mod chain_model;

/// Observability hook invoked after training, after the order search and
/// before sampling.
pub mod observer;

/// Branching-factor bands and their thresholds.
pub mod quality;

/// Fixed-order transition graph with JSON and binary dumps.
pub mod transition_graph;

/// A single context and its recorded successors.
///
/// Only the `State` type is exposed, through the graph accessors.
mod state;

pub use state::State;
