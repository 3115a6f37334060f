use std::{fmt::Display, path::Path};

use serde::{Deserialize, Serialize};

use super::{
    artifacts::{self, ArtifactError},
    model::{LogisticRegression, ModelError},
    vectorizer::TfidfVectorizer,
};

/// The predicted polarity of a text
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    /// Label 1
    Positive,
    /// Label 0
    Negative,
}

impl Sentiment {
    /// Map a classifier label onto a sentiment
    pub fn from_label(label: u8) -> Self {
        if label == 1 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    /// The wire name of the sentiment
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A coarse band summarizing the predicted-class probability
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// 0.5 < score <= 0.65
    Low,
    /// 0.65 < score < 0.75
    Medium,
    /// Everything else, including exactly 0.5
    High,
}

impl Confidence {
    /// Band a predicted-class probability.
    ///
    /// The edges are asymmetric: 0.65 is still "low", 0.75 is already "high", and a
    /// score of exactly 0.5 falls through to "high".
    pub fn from_score(score: f64) -> Self {
        if 0.5 < score && score <= 0.65 {
            Confidence::Low
        } else if 0.65 < score && score < 0.75 {
            Confidence::Medium
        } else {
            Confidence::High
        }
    }

    /// The wire name of the band
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The result of scoring one text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The input text, echoed back
    pub text: String,

    /// Predicted polarity
    pub sentiment: Sentiment,

    /// Probability of the predicted class
    pub score: f64,

    /// Band derived from `score`
    pub confidence: Confidence,
}

/// Raw classifier output for one text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    /// Predicted label, 0 or 1
    pub label: u8,

    /// `[p(0), p(1)]`
    pub probabilities: [f64; 2],
}

/// A frozen vectorizer and classifier pair from one training run
#[derive(Clone, Debug)]
pub struct SentimentPipeline {
    vectorizer: TfidfVectorizer,
    model: LogisticRegression,
}

impl SentimentPipeline {
    /// Pair a vectorizer with a classifier
    pub fn new(vectorizer: TfidfVectorizer, model: LogisticRegression) -> Self {
        Self { vectorizer, model }
    }

    /// Load both artifacts from a directory
    pub fn load(artifact_dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let (vectorizer, model) = artifacts::load(artifact_dir)?;

        Ok(Self::new(vectorizer, model))
    }

    /// The fitted vectorizer
    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// The fitted classifier
    pub fn model(&self) -> &LogisticRegression {
        &self.model
    }

    /// Vectorize a text and run the classifier over it
    pub fn scores(&self, text: &str) -> Result<Scores, ModelError> {
        let features = self.vectorizer.transform(text);

        Ok(Scores {
            label: self.model.predict(features.view())?,
            probabilities: self.model.predict_proba(features.view())?,
        })
    }

    /// Score a text and summarize the result
    pub fn predict(&self, text: &str) -> Result<Prediction, ModelError> {
        let scores = self.scores(text)?;
        let score = scores.probabilities[0].max(scores.probabilities[1]);

        Ok(Prediction {
            text: text.to_string(),
            sentiment: Sentiment::from_label(scores.label),
            score,
            confidence: Confidence::from_score(score),
        })
    }
}
