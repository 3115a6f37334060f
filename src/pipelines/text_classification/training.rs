use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::datasets::train_test_split;

use super::{
    artifacts::{self, CONFIG_FILE, DEFAULT_ARTIFACT_DIR},
    model::{accuracy, FitOptions, LogisticRegression},
    vectorizer::{TfidfVectorizer, DEFAULT_MAX_FEATURES},
    Item, SentimentPipeline,
};

/// Define configuration struct for the experiment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fraction of rows held out for evaluation
    pub test_size: f64,

    /// Seed for the train/test shuffle
    pub seed: u64,

    /// Vocabulary cap for the vectorizer
    pub max_features: usize,

    /// Maximum optimizer iterations
    pub max_iter: u64,

    /// Inverse regularization strength
    pub c: f64,

    /// Gradient tolerance for convergence
    pub tolerance: f64,

    /// Directory the artifacts are written to
    pub artifact_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
            max_features: DEFAULT_MAX_FEATURES,
            max_iter: 1000,
            c: 1.0,
            tolerance: 1e-4,
            artifact_dir: DEFAULT_ARTIFACT_DIR.to_string(),
        }
    }
}

impl Config {
    /// Load a configuration from a YAML file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Unable to read config file {}", path.display()))?;

        serde_yaml::from_str(&contents)
            .with_context(|| format!("Unable to parse config file {}", path.display()))
    }

    fn fit_options(&self) -> FitOptions {
        FitOptions::new(self.c, self.max_iter, self.tolerance)
    }
}

/// Outcome of a training run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// Accuracy on the held-out split, in [0, 1]
    pub accuracy: f64,

    /// Rows used for fitting
    pub n_train: usize,

    /// Rows held out
    pub n_test: usize,

    /// Vocabulary size actually fitted
    pub n_features: usize,
}

/// Split, vectorize, fit, and evaluate. Nothing is written to disk.
pub fn fit<I: Item>(items: &[I], config: &Config) -> anyhow::Result<(SentimentPipeline, Report)> {
    let (train, test) = train_test_split(items, config.test_size, config.seed)
        .context("Unable to split dataset")?;

    log::info!("Split dataset into {} train / {} test rows", train.len(), test.len());

    let train_text: Vec<&str> = train.iter().map(I::input).collect();
    let test_text: Vec<&str> = test.iter().map(I::input).collect();
    let train_labels: Vec<u8> = train.iter().map(I::label).collect();
    let test_labels: Vec<u8> = test.iter().map(I::label).collect();

    let vectorizer = TfidfVectorizer::fit(&train_text, config.max_features)
        .context("Unable to fit vectorizer")?;

    log::info!("Fitted vocabulary of {} terms", vectorizer.n_features());

    let x_train = vectorizer.transform_batch(&train_text);
    let x_test = vectorizer.transform_batch(&test_text);

    let model = LogisticRegression::fit(&x_train, &train_labels, &config.fit_options())
        .context("Unable to fit classifier")?;

    log::info!("Fitted classifier over {} features", model.n_features());

    let predicted = model.predict_batch(&x_test)?;

    let report = Report {
        accuracy: accuracy(&predicted, &test_labels),
        n_train: train.len(),
        n_test: test.len(),
        n_features: vectorizer.n_features(),
    };

    Ok((SentimentPipeline::new(vectorizer, model), report))
}

/// Define train function: fit, then save the artifacts and the config
pub fn train<I: Item>(items: &[I], config: &Config) -> anyhow::Result<Report> {
    let (pipeline, report) = fit(items, config)?;

    let artifact_dir = Path::new(&config.artifact_dir);

    artifacts::save(artifact_dir, pipeline.vectorizer(), pipeline.model())?;
    artifacts::write_json(&artifact_dir.join(CONFIG_FILE), config)?;

    log::info!("Saved artifacts to {}", artifact_dir.display());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::datasets::imdb;

    fn reviews() -> Vec<imdb::Item> {
        let positive = [
            "a great movie with wonderful acting",
            "wonderful story and great characters",
            "I loved it, brilliant and fun",
            "brilliant direction, loved the music",
            "fun and great from start to finish",
            "an excellent film with wonderful scenes",
            "excellent cast, loved every minute",
            "great fun, brilliant script",
            "wonderful and excellent experience",
            "loved the great ending",
        ];
        let negative = [
            "a terrible movie with awful acting",
            "awful story and boring characters",
            "I hated it, dull and boring",
            "terrible direction, hated the music",
            "boring and awful from start to finish",
            "a dreadful film with terrible scenes",
            "dreadful cast, hated every minute",
            "awful and dull script",
            "terrible and boring experience",
            "hated the dull ending",
        ];

        positive
            .iter()
            .map(|r| imdb::Item::new(r.to_string(), 1))
            .chain(negative.iter().map(|r| imdb::Item::new(r.to_string(), 0)))
            .collect()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();

        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_features, 5000);
        assert_eq!(config.max_iter, 1000);
        assert_eq!(config.artifact_dir, "models");
    }

    #[test]
    fn test_config_yaml_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.yaml");
        fs::write(&path, "max_features: 100\nseed: 7\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.max_features, 100);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_iter, 1000);
    }

    #[test]
    fn test_fit_report() {
        let (pipeline, report) = fit(&reviews(), &Config::default()).unwrap();

        assert_eq!(report.n_train, 16);
        assert_eq!(report.n_test, 4);
        assert_eq!(report.n_features, pipeline.vectorizer().n_features());
        assert_eq!(report.accuracy, 1.0);
    }

    #[test]
    fn test_training_is_deterministic() {
        let items = reviews();

        let (first_pipeline, first) = fit(&items, &Config::default()).unwrap();
        let (second_pipeline, second) = fit(&items, &Config::default()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_pipeline.model(), second_pipeline.model());
    }

    #[test]
    fn test_train_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            artifact_dir: dir.path().display().to_string(),
            ..Config::default()
        };

        train(&reviews(), &config).unwrap();

        let pipeline = SentimentPipeline::load(dir.path()).unwrap();
        let prediction = pipeline.predict("wonderful brilliant great").unwrap();

        assert_eq!(prediction.sentiment.as_str(), "positive");
        assert!(dir.path().join(CONFIG_FILE).is_file());
    }

    #[test]
    fn test_fit_rejects_tiny_dataset() {
        let items = vec![imdb::Item::new("only one".to_string(), 1)];

        assert!(fit(&items, &Config::default()).is_err());
    }
}
