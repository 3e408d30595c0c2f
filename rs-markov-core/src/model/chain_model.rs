use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::observer::{ChainObserver, LogObserver, TrainReport};
use super::quality::{Quality, QualityThresholds};
use super::transition_graph::TransitionGraph;
use crate::config::ChainConfig;
use crate::corpus::Corpus;
use crate::error::ChainError;

/// Outcome of an adaptive order search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchReport {
	pub initial_order: usize,
	pub final_order: usize,
	/// Every order that was trained, in search order (strictly decreasing).
	pub orders_tried: Vec<usize>,
	pub branching_factor: f64,
	pub quality: Quality,
}

impl SearchReport {
	/// Number of order reductions performed.
	pub fn steps(&self) -> usize {
		self.orders_tried.len().saturating_sub(1)
	}
}

/// Output of one sampling run.
///
/// `seed` is the initial window drawn from the training sequence,
/// `tokens` the generated continuation (the deliverable).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
	pub seed: Vec<String>,
	pub tokens: Vec<String>,
}

impl Generation {
	/// The continuation as a single space-joined string.
	pub fn text(&self) -> String {
		self.tokens.join(" ")
	}
}

/// Sequence and graph of the current order, replaced as one unit.
#[derive(Clone, Debug)]
struct Trained {
	sequence: Vec<String>,
	graph: TransitionGraph,
	quality: Quality,
}

/// Word-level Markov chain with adaptive order selection.
///
/// # Responsibilities
/// - Own the corpus, the current order and the random source
/// - Build the transition graph for the current order (`train`)
/// - Lower the order until branching is acceptable (`proceed`)
/// - Sample new text from the trained graph (`generate`)
///
/// # Invariants
/// - `order` never exceeds `initial_order` and never drops below 1
/// - When trained, graph and wrap-extended sequence share the same order
pub struct ChainModel {
	corpus: Corpus,
	initial_order: usize,
	order: usize,
	thresholds: QualityThresholds,
	trained: Option<Trained>,
	last_search: Option<SearchReport>,
	rng: StdRng,
	observer: Box<dyn ChainObserver>,
}

impl fmt::Debug for ChainModel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ChainModel")
			.field("tokens", &self.corpus.len())
			.field("initial_order", &self.initial_order)
			.field("order", &self.order)
			.field("thresholds", &self.thresholds)
			.field("trained", &self.trained.as_ref().map(|t| t.graph.len()))
			.field("quality", &self.quality())
			.finish()
	}
}

impl ChainModel {
	/// Creates an untrained model over `corpus`, starting at `order`.
	///
	/// The random source is seeded from the OS; use [`ChainModel::with_seed`]
	/// for replayable runs.
	///
	/// # Errors
	/// - `InvalidOrder` if `order == 0`.
	/// - `EmptyCorpus` if the corpus cannot hold one transition at `order`.
	pub fn new(corpus: Corpus, order: usize) -> Result<Self, ChainError> {
		corpus.ensure_trainable(order)?;
		Ok(Self {
			corpus,
			initial_order: order,
			order,
			thresholds: QualityThresholds::default(),
			trained: None,
			last_search: None,
			rng: StdRng::from_os_rng(),
			observer: Box::new(LogObserver),
		})
	}

	/// Creates a model using the order, thresholds and seed of `config`.
	pub fn from_config(corpus: Corpus, config: &ChainConfig) -> Result<Self, ChainError> {
		config.validate()?;
		let mut model = Self::new(corpus, config.order)?.with_thresholds(config.thresholds)?;
		if let Some(seed) = config.seed {
			model = model.with_seed(seed);
		}
		Ok(model)
	}

	/// Reseeds the model's random source.
	pub fn with_seed(self, seed: u64) -> Self {
		self.with_rng(StdRng::seed_from_u64(seed))
	}

	/// Replaces the model's random source.
	pub fn with_rng(mut self, rng: StdRng) -> Self {
		self.rng = rng;
		self
	}

	pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Result<Self, ChainError> {
		thresholds.validate()?;
		self.thresholds = thresholds;
		Ok(self)
	}

	pub fn with_observer(mut self, observer: Box<dyn ChainObserver>) -> Self {
		self.observer = observer;
		self
	}

	pub fn corpus(&self) -> &Corpus {
		&self.corpus
	}

	pub fn initial_order(&self) -> usize {
		self.initial_order
	}

	/// Current order (the chosen one after [`ChainModel::proceed`]).
	pub fn order(&self) -> usize {
		self.order
	}

	pub fn thresholds(&self) -> &QualityThresholds {
		&self.thresholds
	}

	/// Quality band of the current graph, `None` before training.
	pub fn quality(&self) -> Option<Quality> {
		self.trained.as_ref().map(|t| t.quality)
	}

	/// Classifies the current graph against the model's thresholds.
	///
	/// Returns `None` before training.
	pub fn evaluate(&self) -> Option<Quality> {
		self.branching_factor().map(|b| self.thresholds.classify(b))
	}

	/// Branching factor of the current graph, `None` before training.
	pub fn branching_factor(&self) -> Option<f64> {
		self.trained.as_ref().map(|t| t.graph.branching_factor())
	}

	pub fn graph(&self) -> Option<&TransitionGraph> {
		self.trained.as_ref().map(|t| &t.graph)
	}

	/// Wrap-extended sequence the current graph was built from.
	pub fn sequence(&self) -> Option<&[String]> {
		self.trained.as_ref().map(|t| t.sequence.as_slice())
	}

	pub fn last_search(&self) -> Option<&SearchReport> {
		self.last_search.as_ref()
	}

	/// Builds the graph for the current order.
	///
	/// Any previous graph is discarded, never merged into.
	pub fn train(&mut self) -> Result<TrainReport, ChainError> {
		self.train_at(self.order)
	}

	/// Swaps in a new corpus, resets the order to its initial value and
	/// trains from scratch.
	///
	/// # Errors
	/// `EmptyCorpus` if the new corpus is too short; the model is then left
	/// untrained.
	pub fn retrain(&mut self, corpus: Corpus) -> Result<TrainReport, ChainError> {
		self.trained = None;
		self.last_search = None;
		self.corpus = corpus;
		self.order = self.initial_order;
		self.train()
	}

	/// Trains at `order` and commits order and graph together.
	fn train_at(&mut self, order: usize) -> Result<TrainReport, ChainError> {
		let built = self
			.corpus
			.wrapped(order)
			.and_then(|sequence| TransitionGraph::build(&sequence, order).map(|graph| (sequence, graph)));
		let (sequence, graph) = match built {
			Ok(built) => built,
			Err(e) => {
				self.trained = None;
				return Err(e);
			}
		};

		let branching_factor = graph.branching_factor();
		let quality = self.thresholds.classify(branching_factor);
		let report = TrainReport {
			order,
			states: graph.len(),
			transitions: graph.transition_count(),
			branching_factor,
			quality,
		};

		self.order = order;
		self.trained = Some(Trained { sequence, graph, quality });
		self.observer.on_trained(&report);
		Ok(report)
	}

	/// Trains, then lowers the order one step at a time until the graph
	/// reaches an `Acceptable` or `Good` band.
	///
	/// Order 1 is the floor: the search stops there whatever the quality.
	/// The search starts from the current order and never raises it, so it
	/// ends after at most `order - 1` reductions.
	pub fn proceed(&mut self) -> Result<SearchReport, ChainError> {
		let initial_order = self.order;
		let mut orders_tried = vec![initial_order];
		let mut report = self.train_at(initial_order)?;

		while !report.quality.is_sufficient() && report.order > 1 {
			let next = report.order - 1;
			orders_tried.push(next);
			report = self.train_at(next)?;
		}

		let search = SearchReport {
			initial_order,
			final_order: report.order,
			orders_tried,
			branching_factor: report.branching_factor,
			quality: report.quality,
		};
		self.observer.on_searched(&search);
		self.last_search = Some(search.clone());
		Ok(search)
	}

	/// Generates `length` words with the model's own random source.
	pub fn generate(&mut self, length: usize) -> Result<String, ChainError> {
		let trained = self.trained.as_ref().ok_or(ChainError::NotTrained)?;
		self.observer.on_generate(trained.graph.order(), length);
		Ok(sample(trained, &mut self.rng, length)?.text())
	}

	/// Generates `length` words with a caller-supplied random source.
	///
	/// Only reads the model, so a trained model can serve concurrent callers.
	pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, length: usize) -> Result<String, ChainError> {
		Ok(self.generate_sequence_with(rng, length)?.text())
	}

	/// Like [`ChainModel::generate_with`] but also returns the seed window.
	pub fn generate_sequence_with<R: Rng + ?Sized>(
		&self,
		rng: &mut R,
		length: usize,
	) -> Result<Generation, ChainError> {
		let trained = self.trained.as_ref().ok_or(ChainError::NotTrained)?;
		self.observer.on_generate(trained.graph.order(), length);
		sample(trained, rng, length)
	}
}

/// Upper bound on the up-front buffer reservation; longer runs grow it.
const MAX_RESERVED_TOKENS: usize = 1 << 16;

/// Seeds the buffer with a random window of the training sequence, then
/// appends `length` sampled words.
fn sample<R: Rng + ?Sized>(trained: &Trained, rng: &mut R, length: usize) -> Result<Generation, ChainError> {
	if length == 0 {
		return Err(ChainError::InvalidLength);
	}

	let order = trained.graph.order();
	let sequence = &trained.sequence;
	let start = rng.random_range(0..=sequence.len() - order);

	let mut buffer: Vec<String> = Vec::with_capacity(order + length.min(MAX_RESERVED_TOKENS));
	buffer.extend_from_slice(&sequence[start..start + order]);

	for _ in 0..length {
		let context = &buffer[buffer.len() - order..];
		let next = trained
			.graph
			.predict(context, rng)
			.ok_or_else(|| ChainError::UndefinedTransition {
				state: context.to_vec(),
				order,
				buffer_len: buffer.len(),
			})?
			.to_owned();
		buffer.push(next);
	}

	let tokens = buffer.split_off(order);
	Ok(Generation { seed: buffer, tokens })
}
