//! Word-level Markov chain text generation.
//!
//! This crate learns which words follow each `order`-word context in a corpus
//! and samples new text from those transitions:
//! - Corpus loading from text, files or scraped biography dumps
//! - Transition graph construction over a wrap-extended token sequence
//! - Adaptive order search driven by the average branching factor
//! - Seedable sampling for replayable output
//!
//! ```no_run
//! use rs_markov_core::corpus::{Corpus, CorpusSource};
//! use rs_markov_core::model::chain_model::ChainModel;
//!
//! # fn main() -> Result<(), rs_markov_core::error::ChainError> {
//! let corpus = Corpus::load(&CorpusSource::biography("bio_files", "Simon"))?;
//! let mut model = ChainModel::new(corpus, 4)?.with_seed(42);
//! let report = model.proceed()?;
//! println!("order {} ({})", report.final_order, report.quality);
//! println!("{}", model.generate(100)?);
//! # Ok(())
//! # }
//! ```

/// Chain model, transition graph and quality bands.
pub mod model;

/// Token sequence loading and the wrap extension.
pub mod corpus;

/// Run parameters loaded from TOML.
pub mod config;

/// Error taxonomy.
pub mod error;

/// File helpers (token reading, path building).
pub(crate) mod io;

pub use io::build_output_path;
