/// langdetect: trains a small sigmoid network to tell languages apart from
/// character trigram frequencies, then scores it against a labelled test file.
///
/// Run with:
///   cargo run --release -- --dataset dataset --tests tests --solutions solutions
///
/// `dataset/` holds one `<language>.txt` file per label, one sentence per line.
/// A trained model is written to `--model` and reused on later runs.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use brainlet::data::{load_labelled_dir, load_test_set};
use brainlet::train::TextExamples;
use brainlet::{train, LabelEncoder, Model, Network, TrainConfig, Vocabulary};

#[derive(Parser)]
#[command(name = "langdetect", version, about)]
struct Cli {
    /// Directory with one `<label>.txt` file per category.
    #[arg(long, default_value = "dataset")]
    dataset: PathBuf,

    /// Model file; loaded when present, written after training otherwise.
    #[arg(long, default_value = "brain.json")]
    model: PathBuf,

    /// Train a fresh model even if `--model` exists.
    #[arg(long)]
    retrain: bool,

    /// Sentences to classify, one per line.
    #[arg(long, requires = "solutions")]
    tests: Option<PathBuf>,

    /// Expected labels for `--tests`; the last word of each line is the label.
    #[arg(long, requires = "tests")]
    solutions: Option<PathBuf>,

    /// Character n-gram size.
    #[arg(long, default_value_t = 3)]
    ngram: usize,

    /// Hidden layer sizes, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "16")]
    hidden: Vec<usize>,

    /// Stop after this many updates (unbounded by default).
    #[arg(long)]
    total_steps: Option<usize>,

    #[arg(long, default_value_t = 0.01)]
    min_lr: f64,

    #[arg(long, default_value_t = 0.10)]
    max_lr: f64,

    #[arg(long, default_value_t = 100_000)]
    lr_period: usize,

    /// Early-stopping threshold on a single example's mean absolute error.
    #[arg(long, default_value_t = 0.0001)]
    min_error: f64,

    /// Seed for weight initialisation and shuffling.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn train_config(&self) -> TrainConfig {
        TrainConfig {
            total_steps: self.total_steps,
            ..TrainConfig::new()
                .with_lr_bounds(self.min_lr, self.max_lr)
                .with_lr_period(self.lr_period)
                .with_min_error(self.min_error)
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let model = if cli.model.exists() && !cli.retrain {
        info!("loading model from {}", cli.model.display());
        Model::load_json(&cli.model)
            .with_context(|| format!("failed to load model {}", cli.model.display()))?
    } else {
        let model = train_model(&cli)?;
        model
            .save_json(&cli.model)
            .with_context(|| format!("failed to save model {}", cli.model.display()))?;
        info!("model saved to {}", cli.model.display());
        model
    };

    if let (Some(tests), Some(solutions)) = (&cli.tests, &cli.solutions) {
        evaluate(&model, tests, solutions)?;
    }
    Ok(())
}

fn train_model(cli: &Cli) -> Result<Model> {
    let corpus = load_labelled_dir(&cli.dataset)
        .with_context(|| format!("failed to read dataset {}", cli.dataset.display()))?;
    let vocabulary = Vocabulary::build(corpus.texts(), cli.ngram)?;
    let labels = LabelEncoder::new(corpus.labels.iter().cloned())?;

    let mut sizes = vec![vocabulary.len()];
    sizes.extend(&cli.hidden);
    sizes.push(labels.len());

    let mut rng = cli.rng();
    let mut network = Network::random(&sizes, &mut rng)?;
    info!(
        "{} samples, {} labels, vocabulary of {} {}-grams, layers {:?}",
        corpus.samples.len(),
        labels.len(),
        vocabulary.len(),
        cli.ngram,
        sizes
    );

    info!("training...");
    let mut source = TextExamples::new(&corpus.samples, &vocabulary, &labels, rng);
    let report = train(&mut network, &mut source, &cli.train_config())?;
    info!("training finished: {:?} after {} steps", report.state, report.steps);

    Ok(Model::new(vocabulary, labels, network)?)
}

fn evaluate(model: &Model, tests: &Path, solutions: &Path) -> Result<()> {
    let samples = load_test_set(tests, solutions).context("failed to read test set")?;
    let mut matches = 0;

    for sample in &samples {
        let preview: String = sample.text.chars().take(30).collect();
        let predicted = model.classify(&sample.text);
        if predicted == sample.label {
            matches += 1;
            println!("✅ \"{preview:<30}\" {predicted:<8}");
        } else {
            println!("❌ \"{preview:<30}\" {predicted:<8} ({})", sample.label);
        }
    }

    let accuracy = if samples.is_empty() {
        0.0
    } else {
        matches as f64 / samples.len() as f64 * 100.0
    };
    println!("Accuracy: {accuracy:.2}%");
    Ok(())
}
