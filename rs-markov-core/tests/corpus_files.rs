use std::fs;

use rs_markov_core::config::ChainConfig;
use rs_markov_core::corpus::{Corpus, CorpusSource};
use rs_markov_core::error::ChainError;
use rs_markov_core::model::chain_model::ChainModel;
use rs_markov_core::model::transition_graph::TransitionGraph;

const BIO: &str = "Simon was born in a small town. Simon was a painter and \
Simon was a writer. He was born in spring and he was a quiet man.";

#[test]
fn biography_file_trains_and_generates() {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("Simon_Biographies.txt"), BIO).unwrap();

	let corpus = Corpus::load(&CorpusSource::biography(dir.path(), "Simon")).unwrap();
	let mut model = ChainModel::new(corpus, 4).unwrap().with_seed(5);
	let report = model.proceed().unwrap();
	assert!(report.final_order <= 4);
	assert_eq!(model.generate(25).unwrap().split(' ').count(), 25);
}

#[test]
fn missing_biography_is_source_unavailable() {
	let dir = tempfile::tempdir().unwrap();
	let err = Corpus::load(&CorpusSource::biography(dir.path(), "Nobody")).unwrap_err();
	assert!(matches!(err, ChainError::SourceUnavailable { .. }));
}

#[test]
fn graph_dumps_survive_a_round_trip_on_disk() {
	let dir = tempfile::tempdir().unwrap();
	let mut model = ChainModel::new(Corpus::from_text(BIO), 2).unwrap();
	model.train().unwrap();
	let graph = model.graph().unwrap();

	let json = dir.path().join("graph.json");
	let bin = dir.path().join("graph.bin");
	graph.save(&json).unwrap();
	graph.save(&bin).unwrap();

	assert!(fs::read_to_string(&json).unwrap().contains("\"successors\""));
	assert_eq!(&TransitionGraph::load(&json).unwrap(), graph);
	assert_eq!(&TransitionGraph::load(&bin).unwrap(), graph);
}

#[test]
fn config_file_drives_the_model() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("chain.toml");
	fs::write(&path, "order = 3\nlength = 12\nseed = 9\n").unwrap();
	let config = ChainConfig::from_file(&path).unwrap();

	let mut a = ChainModel::from_config(Corpus::from_text(BIO), &config).unwrap();
	let mut b = ChainModel::from_config(Corpus::from_text(BIO), &config).unwrap();
	a.proceed().unwrap();
	b.proceed().unwrap();
	assert_eq!(a.order(), b.order());
	assert_eq!(a.generate(config.length).unwrap(), b.generate(config.length).unwrap());
}
