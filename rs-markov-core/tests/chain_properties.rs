use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_markov_core::corpus::Corpus;
use rs_markov_core::model::chain_model::ChainModel;
use rs_markov_core::model::transition_graph::TransitionGraph;

fn words() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec(
		prop::sample::select(vec!["the", "cat", "sat", "on", "mat", "ran", "a", "dog"]),
		2..80,
	)
	.prop_map(|w| w.into_iter().map(str::to_owned).collect())
}

proptest! {
	#[test]
	fn keys_have_order_words_and_states_are_non_empty(tokens in words(), order in 1usize..5) {
		prop_assume!(tokens.len() > order);
		let sequence = Corpus::from_tokens(tokens.clone()).wrapped(order).unwrap();
		let graph = TransitionGraph::build(&sequence, order).unwrap();
		for state in graph.states() {
			prop_assert_eq!(state.key().len(), order);
			prop_assert!(!state.is_empty());
		}
		// One transition per original token thanks to the wrap extension
		prop_assert_eq!(graph.transition_count(), tokens.len());
	}

	#[test]
	fn training_is_deterministic(tokens in words(), order in 1usize..5) {
		prop_assume!(tokens.len() > order);
		let sequence = Corpus::from_tokens(tokens).wrapped(order).unwrap();
		let a = TransitionGraph::build(&sequence, order).unwrap();
		let b = TransitionGraph::build(&sequence, order).unwrap();
		prop_assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
		prop_assert_eq!(a, b);
	}

	#[test]
	fn generation_has_requested_length_and_valid_transitions(
		tokens in words(),
		order in 1usize..4,
		length in 1usize..60,
		seed in any::<u64>(),
	) {
		prop_assume!(tokens.len() > order);
		let mut model = ChainModel::new(Corpus::from_tokens(tokens), order).unwrap();
		model.train().unwrap();
		let mut rng = StdRng::seed_from_u64(seed);
		let generation = model.generate_sequence_with(&mut rng, length).unwrap();
		prop_assert_eq!(generation.tokens.len(), length);
		prop_assert_eq!(generation.seed.len(), order);

		let graph = model.graph().unwrap();
		let mut buffer = generation.seed.clone();
		for token in &generation.tokens {
			let state = graph.get(&buffer[buffer.len() - order..]);
			prop_assert!(state.is_some_and(|s| s.successors().contains(token)));
			buffer.push(token.clone());
		}
	}

	#[test]
	fn search_order_only_decreases(tokens in words(), order in 1usize..6) {
		prop_assume!(tokens.len() > order);
		let mut model = ChainModel::new(Corpus::from_tokens(tokens), order).unwrap();
		let report = model.proceed().unwrap();
		prop_assert!(report.steps() < order);
		prop_assert!(report.orders_tried.windows(2).all(|w| w[1] + 1 == w[0]));
		prop_assert_eq!(report.orders_tried[0], order);
		prop_assert_eq!(report.final_order, model.order());
		prop_assert!(report.final_order >= 1);
		// Stopping above the floor means the band was good enough
		if report.final_order > 1 {
			prop_assert!(report.quality.is_sufficient());
		}
	}
}
