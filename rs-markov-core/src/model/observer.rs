use super::chain_model::SearchReport;
use super::quality::Quality;

/// Summary of one graph build.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrainReport {
	pub order: usize,
	pub states: usize,
	pub transitions: usize,
	pub branching_factor: f64,
	pub quality: Quality,
}

/// Hook called by [`ChainModel`](super::chain_model::ChainModel) at fixed
/// points of its lifecycle.
///
/// All methods default to doing nothing, so an observer only implements the
/// events it cares about.
pub trait ChainObserver: Send + Sync {
	/// After every graph build, including each step of the order search.
	fn on_trained(&self, _report: &TrainReport) {}

	/// Once the order search has settled.
	fn on_searched(&self, _report: &SearchReport) {}

	/// Right before sampling starts.
	fn on_generate(&self, _order: usize, _length: usize) {}
}

/// Default observer: forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ChainObserver for LogObserver {
	fn on_trained(&self, report: &TrainReport) {
		log::debug!(
			"trained order {}: {} states, {} transitions, branching {:.3} ({})",
			report.order,
			report.states,
			report.transitions,
			report.branching_factor,
			report.quality
		);
	}

	fn on_searched(&self, report: &SearchReport) {
		log::info!(
			"order search {} -> {} after {} step(s), branching {:.3} ({})",
			report.initial_order,
			report.final_order,
			report.steps(),
			report.branching_factor,
			report.quality
		);
	}

	fn on_generate(&self, order: usize, length: usize) {
		log::debug!("generating {length} tokens at order {order}");
	}
}
