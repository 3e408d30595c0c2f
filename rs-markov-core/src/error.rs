use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by corpus loading, training and generation.
///
/// All errors are local to the call that produced them. Nothing in this crate
/// retries: a failure reflects bad input, not a transient condition.
#[derive(Error, Debug)]
pub enum ChainError {
	/// The corpus resource could not be read.
	#[error("corpus source unavailable: {}: {source}", .path.display())]
	SourceUnavailable {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Not enough tokens to form a single transition at the requested order.
	#[error("corpus has {tokens} tokens, order {order} needs at least {required}")]
	EmptyCorpus {
		tokens: usize,
		order: usize,
		required: usize,
	},

	/// A state reached during sampling has no entry in the graph.
	///
	/// Training inserts every state the sampler can reach, so this is a defect
	/// and never a recoverable condition.
	#[error("no transition recorded for state {state:?} (order {order}, buffer length {buffer_len})")]
	UndefinedTransition {
		state: Vec<String>,
		order: usize,
		buffer_len: usize,
	},

	#[error("order must be >= 1, got {0}")]
	InvalidOrder(usize),

	#[error("generated length must be >= 1")]
	InvalidLength,

	#[error("model has not been trained")]
	NotTrained,

	#[error("config error: {0}")]
	Config(String),

	#[error("serialization error: {0}")]
	Serialization(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

impl From<postcard::Error> for ChainError {
	fn from(err: postcard::Error) -> Self {
		ChainError::Serialization(err.to_string())
	}
}

impl From<serde_json::Error> for ChainError {
	fn from(err: serde_json::Error) -> Self {
		ChainError::Serialization(err.to_string())
	}
}

impl From<toml::de::Error> for ChainError {
	fn from(err: toml::de::Error) -> Self {
		ChainError::Config(err.to_string())
	}
}
