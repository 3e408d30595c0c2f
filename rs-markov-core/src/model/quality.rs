use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChainError;

/// Branching-factor bands used by the adaptive order search.
///
/// Comparisons are strict: an average of exactly `good` is `Acceptable`,
/// exactly `acceptable` is `Marginal`, exactly `marginal` is `OrderTooHigh`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct QualityThresholds {
	/// Above this, the order is `Good`.
	pub good: f64,
	/// Above this (up to `good`), the order is `Acceptable`.
	pub acceptable: f64,
	/// Above this (up to `acceptable`), the order is `Marginal`.
	pub marginal: f64,
}

impl Default for QualityThresholds {
	fn default() -> Self {
		Self { good: 2.0, acceptable: 1.5, marginal: 1.1 }
	}
}

impl QualityThresholds {
	/// Checks the bands are positive and strictly decreasing.
	pub fn validate(&self) -> Result<(), ChainError> {
		let ordered = self.good > self.acceptable && self.acceptable > self.marginal;
		if !ordered || !(self.marginal > 0.0) || !self.good.is_finite() {
			return Err(ChainError::Config(format!(
				"thresholds must satisfy good > acceptable > marginal > 0, got {} / {} / {}",
				self.good, self.acceptable, self.marginal
			)));
		}
		Ok(())
	}

	/// Maps an average branching factor to its band.
	pub fn classify(&self, branching_factor: f64) -> Quality {
		if branching_factor > self.good {
			Quality::Good
		} else if branching_factor > self.acceptable {
			Quality::Acceptable
		} else if branching_factor > self.marginal {
			Quality::Marginal
		} else {
			Quality::OrderTooHigh
		}
	}
}

/// How well a given order diversifies generation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
	Good,
	Acceptable,
	Marginal,
	OrderTooHigh,
}

impl Quality {
	/// `true` when the search may stop at this order.
	pub fn is_sufficient(self) -> bool {
		matches!(self, Quality::Good | Quality::Acceptable)
	}
}

impl fmt::Display for Quality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Quality::Good => "good",
			Quality::Acceptable => "acceptable",
			Quality::Marginal => "marginal",
			Quality::OrderTooHigh => "order too high",
		};
		f.write_str(label)
	}
}
