use std::path::PathBuf;

use clap::Parser;
use rs_markov_core::config::ChainConfig;
use rs_markov_core::corpus::{Corpus, CorpusSource};
use rs_markov_core::build_output_path;
use rs_markov_core::model::chain_model::ChainModel;

/// Generate text from a corpus with an adaptive-order Markov chain.
#[derive(Parser, Debug)]
#[command(name = "rs-markov", version, about)]
struct Args {
    /// Corpus text file (words separated by whitespace)
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    corpus: Option<PathBuf>,

    /// Biography name; reads `<bio-dir>/<name>_Biographies.txt`
    #[arg(long)]
    name: Option<String>,

    /// Directory holding scraped biographies
    #[arg(long, default_value = "bio_files")]
    bio_dir: PathBuf,

    /// TOML config file (order, length, seed, thresholds)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial order of the search
    #[arg(short, long)]
    order: Option<usize>,

    /// Number of words to generate
    #[arg(short, long)]
    length: Option<usize>,

    /// Seed for replayable output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the trained graph (`.json` for JSON, anything else for binary).
    /// Without a path, writes `<corpus>.json` next to the corpus
    #[arg(long, value_name = "PATH")]
    dump_graph: Option<Option<PathBuf>>,

    /// Log debug events
    #[arg(short, long)]
    verbose: bool,
}

/// `<corpus stem>.json` next to the corpus, or `<corpus stem>.graph.json`
/// when the corpus itself is a `.json` file.
fn default_dump_path(source: &CorpusSource) -> std::io::Result<PathBuf> {
    let base = match source {
        CorpusSource::File(p) => p.clone(),
        CorpusSource::Biography { dir, name } => dir.join(name),
        CorpusSource::Text(_) => PathBuf::from("graph"),
    };
    let path = build_output_path(&base, "json")?;
    if path == base {
        return build_output_path(&base, "graph.json");
    }
    Ok(path)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Command line values win over the config file
    let mut config = match &args.config {
        Some(path) => ChainConfig::from_file(path)?,
        None => ChainConfig::default(),
    };
    if let Some(order) = args.order { config.order = order; }
    if let Some(length) = args.length { config.length = length; }
    if args.seed.is_some() { config.seed = args.seed; }
    config.validate()?;

    let source = match (&args.corpus, &args.name) {
        (Some(path), _) => CorpusSource::File(path.clone()),
        (None, Some(name)) => CorpusSource::biography(&args.bio_dir, name),
        (None, None) => return Err("a corpus path or --name is required".into()),
    };
    let corpus = Corpus::load(&source)?;
    log::info!("corpus: {} tokens", corpus.len());

    let mut model = ChainModel::from_config(corpus, &config)?;
    let report = model.proceed()?;
    log::info!(
        "chosen order: {} (started at {}, quality {}, branching {:.3})",
        report.final_order,
        report.initial_order,
        report.quality,
        report.branching_factor
    );

    println!("{}", model.generate(config.length)?);

    if let Some(target) = &args.dump_graph {
        let path = match target {
            Some(path) => path.clone(),
            None => default_dump_path(&source)?,
        };
        if let Some(graph) = model.graph() {
            graph.save(&path)?;
        }
    }

    Ok(())
}
