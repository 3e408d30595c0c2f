use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use crate::model::quality::QualityThresholds;

/// Runtime parameters of a generation run.
///
/// Every field has a default, so a TOML file only lists what it changes:
///
/// ```toml
/// order = 3
/// length = 50
/// seed = 42
///
/// [thresholds]
/// good = 2.5
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
	/// Initial order of the search.
	pub order: usize,
	/// Number of words to generate.
	pub length: usize,
	/// Seed of the random source. `None` seeds from the OS.
	pub seed: Option<u64>,
	/// Quality bands used by the order search.
	pub thresholds: QualityThresholds,
}

impl Default for ChainConfig {
	fn default() -> Self {
		Self {
			order: 4,
			length: 100,
			seed: None,
			thresholds: QualityThresholds::default(),
		}
	}
}

impl ChainConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, ChainError> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ChainError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path)
			.map_err(|e| ChainError::Config(format!("cannot read {}: {e}", path.display())))?;
		Self::from_toml_str(&text)
	}

	pub fn validate(&self) -> Result<(), ChainError> {
		if self.order == 0 {
			return Err(ChainError::InvalidOrder(self.order));
		}
		if self.length == 0 {
			return Err(ChainError::InvalidLength);
		}
		self.thresholds.validate()
	}
}
