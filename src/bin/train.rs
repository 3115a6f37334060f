//! Command line tool for training

use anyhow::anyhow;
use pico_args::Arguments;
use sentiment_pipeline::{
    datasets::imdb,
    pipelines::text_classification::{train, training::Config},
};

const HELP: &str = "\
Usage: train DATASET [OPTIONS]

Arguments:
  DATASET              Path to a CSV file with 'review' and 'sentiment' columns

Options:
  -h, --help           Print help
  -c, --config         A YAML training config; flags below override it
  -o, --artifact-dir   Where to write the artifacts (defaults to 'models')
  -f, --max-features   Vocabulary size (defaults to 5000)
  -i, --max-iter       Maximum optimizer iterations (defaults to 1000)
  -s, --seed           Seed for the train/test split (defaults to 42)
";

#[derive(Debug)]
struct Args {
    dataset: String,
    config: Option<String>,
    artifact_dir: Option<String>,
    max_features: Option<usize>,
    max_iter: Option<u64>,
    seed: Option<u64>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            artifact_dir: pargs.opt_value_from_str(["-o", "--artifact-dir"])?,
            max_features: pargs.opt_value_from_str(["-f", "--max-features"])?,
            max_iter: pargs.opt_value_from_str(["-i", "--max-iter"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }

    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(artifact_dir) = &self.artifact_dir {
            config.artifact_dir = artifact_dir.clone();
        }

        if let Some(max_features) = self.max_features {
            config.max_features = max_features;
        }

        if let Some(max_iter) = self.max_iter {
            config.max_iter = max_iter;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let config = args.config()?;
    let dataset = imdb::Dataset::load(&args.dataset)?;

    let report = train(dataset.items(), &config)?;

    println!("Model accuracy: {:.2}%", report.accuracy * 100.0);
    println!("Model trained and saved successfully.");

    Ok(())
}

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    pretty_env_logger::init();
}
