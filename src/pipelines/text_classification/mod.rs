/// Binary logistic regression
pub mod model;

/// TF-IDF vectorization
pub mod vectorizer;

/// Text Classification Items
pub mod item;

/// Saving and loading fitted artifacts
pub mod artifacts;

/// Training
pub mod training;

/// Inference
pub mod inference;

pub use artifacts::ArtifactError;
pub use inference::{Confidence, Prediction, Sentiment, SentimentPipeline};
pub use item::Item;
pub use model::{LogisticRegression, ModelError};
pub use training::train;
pub use vectorizer::TfidfVectorizer;
