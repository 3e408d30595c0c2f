use std::path::{Path, PathBuf};

use crate::error::ChainError;
use crate::io::{biography_path, read_tokens, split_tokens};

/// Where a corpus comes from.
///
/// # Variants
/// - `Text(String)`: raw text held in memory.
/// - `File(PathBuf)`: any readable text file.
/// - `Biography { dir, name }`: the `<dir>/<name>_Biographies.txt` file
///   produced by the scraping pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum CorpusSource {
	Text(String),
	File(PathBuf),
	Biography { dir: PathBuf, name: String },
}

impl CorpusSource {
	/// Shorthand for a scraped biography file.
	pub fn biography<P: AsRef<Path>>(dir: P, name: &str) -> Self {
		CorpusSource::Biography { dir: dir.as_ref().to_path_buf(), name: name.to_owned() }
	}
}

/// Ordered, immutable token sequence used for one training run.
///
/// Tokens are whitespace-delimited words, kept in corpus order with
/// repetitions. The sequence is never mutated; the wrap extension needed
/// by the chain is produced as a new vector by [`Corpus::wrapped`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
	tokens: Vec<String>,
}

impl Corpus {
	/// Tokenizes raw text.
	pub fn from_text(text: &str) -> Self {
		Self { tokens: split_tokens(text) }
	}

	/// Reads and tokenizes a file.
	///
	/// # Errors
	/// `SourceUnavailable` when the file cannot be opened or read.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ChainError> {
		let path = path.as_ref();
		let tokens = read_tokens(path).map_err(|source| ChainError::SourceUnavailable {
			path: path.to_path_buf(),
			source,
		})?;
		log::debug!("loaded {} tokens from {}", tokens.len(), path.display());
		Ok(Self { tokens })
	}

	/// Loads a corpus from any supported source.
	pub fn load(source: &CorpusSource) -> Result<Self, ChainError> {
		match source {
			CorpusSource::Text(text) => Ok(Self::from_text(text)),
			CorpusSource::File(path) => Self::from_file(path),
			CorpusSource::Biography { dir, name } => Self::from_file(biography_path(dir, name)),
		}
	}

	/// Builds a corpus from already split tokens.
	pub fn from_tokens<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { tokens: tokens.into_iter().map(Into::into).collect() }
	}

	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Checks that at least one transition exists at `order`.
	///
	/// # Errors
	/// - `InvalidOrder` if `order == 0`.
	/// - `EmptyCorpus` if fewer than `order + 1` tokens are available.
	pub fn ensure_trainable(&self, order: usize) -> Result<(), ChainError> {
		if order == 0 {
			return Err(ChainError::InvalidOrder(order));
		}
		let required = order + 1;
		if self.tokens.len() < required {
			return Err(ChainError::EmptyCorpus { tokens: self.tokens.len(), order, required });
		}
		Ok(())
	}

	/// Returns the token sequence extended with a copy of its first `order`
	/// tokens.
	///
	/// The extension makes the chain cyclic: the last tokens of the corpus
	/// still get full-length contexts, at the cost of one artificial
	/// wrap-around transition per run.
	pub fn wrapped(&self, order: usize) -> Result<Vec<String>, ChainError> {
		self.ensure_trainable(order)?;
		let mut sequence = Vec::with_capacity(self.tokens.len() + order);
		sequence.extend_from_slice(&self.tokens);
		sequence.extend_from_slice(&self.tokens[..order]);
		Ok(sequence)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wrapped_appends_prefix() {
		let corpus = Corpus::from_text("a b c d");
		assert_eq!(corpus.wrapped(2).unwrap(), vec!["a", "b", "c", "d", "a", "b"]);
		// The corpus itself is untouched
		assert_eq!(corpus.len(), 4);
	}

	#[test]
	fn too_short_for_order() {
		let corpus = Corpus::from_text("a b c");
		match corpus.wrapped(5) {
			Err(ChainError::EmptyCorpus { tokens, order, required }) => {
				assert_eq!((tokens, order, required), (3, 5, 6));
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn exactly_order_plus_one_is_enough() {
		let corpus = Corpus::from_text("a b c");
		assert!(corpus.wrapped(2).is_ok());
	}

	#[test]
	fn zero_order_is_rejected() {
		let corpus = Corpus::from_text("a b c");
		assert!(matches!(corpus.ensure_trainable(0), Err(ChainError::InvalidOrder(0))));
	}

	#[test]
	fn missing_file_is_source_unavailable() {
		let err = Corpus::load(&CorpusSource::biography("/nonexistent/dir", "Nobody")).unwrap_err();
		match err {
			ChainError::SourceUnavailable { path, .. } => {
				assert!(path.ends_with("Nobody_Biographies.txt"));
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}

	#[test]
	fn text_source_splits_on_whitespace() {
		let corpus = Corpus::load(&CorpusSource::Text("one\ttwo\nthree".to_owned())).unwrap();
		assert_eq!(corpus.tokens(), ["one", "two", "three"]);
	}
}
