#![allow(dead_code)]

use ndarray::array;
use sentiment_pipeline::{
    datasets::imdb,
    pipelines::text_classification::{LogisticRegression, SentimentPipeline, TfidfVectorizer},
};

/// A tiny pipeline with hand-set weights.
///
/// Vocabulary (alphabetical): awful, boring, fun, great, movie
pub fn fixed_pipeline() -> SentimentPipeline {
    let docs = ["great fun movie", "awful boring movie"];
    let vectorizer = TfidfVectorizer::fit(&docs, 10).unwrap();
    let model = LogisticRegression::from_parameters(array![-3.0, -3.0, 3.0, 3.0, 0.0], 0.0);

    SentimentPipeline::new(vectorizer, model)
}

/// A small labeled corpus with clearly separated vocabularies
pub fn reviews() -> Vec<imdb::Item> {
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
