//! TF-IDF text vectorization.
//!
//! Text is lowercased and split into tokens of two or more word characters. The
//! vocabulary keeps the most frequent terms of the fitted corpus, and documents are
//! mapped to L2-normalized `count * idf` vectors.

use std::collections::{BTreeMap, HashMap, HashSet};

use lazy_static::lazy_static;
use ndarray::{Array1, Array2};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

lazy_static! {
    static ref TOKEN_PATTERN: Regex = Regex::new(r"\b\w\w+\b").expect("valid token pattern");
}

/// Split lowercased text into vocabulary tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();

    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A fitted TF-IDF vectorizer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term to feature index, indices assigned in alphabetical term order
    vocabulary: BTreeMap<String, usize>,

    /// Smoothed inverse document frequency per feature index
    idf: Array1<f64>,

    /// The vocabulary cap used during fitting
    max_features: usize,
}

impl TfidfVectorizer {
    /// Fit the vocabulary and idf weights on a corpus
    pub fn fit<S: AsRef<str>>(
        documents: &[S],
        max_features: usize,
    ) -> Result<Self, VectorizerError> {
        if max_features == 0 {
            return Err(VectorizerError::NoFeatures);
        }

        let mut term_counts: HashMap<String, usize> = HashMap::new();
        let mut doc_counts: HashMap<String, usize> = HashMap::new();

        for document in documents {
            let tokens = tokenize(document.as_ref());
            let unique: HashSet<&String> = tokens.iter().collect();

            for term in unique {
                *doc_counts.entry(term.clone()).or_insert(0) += 1;
            }
            for term in tokens {
                *term_counts.entry(term).or_insert(0) += 1;
            }
        }

        if term_counts.is_empty() {
            return Err(VectorizerError::EmptyVocabulary);
        }

        // Highest corpus frequency first, ties broken alphabetically
        let mut ranked: Vec<(String, usize)> = term_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        let n_docs = documents.len() as f64;
        let idf = kept
            .iter()
            .map(|term| {
                let df = doc_counts.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect::<Array1<f64>>();

        let vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        Ok(Self {
            vocabulary,
            idf,
            max_features,
        })
    }

    /// The number of features produced per document
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// The vocabulary cap this vectorizer was fitted with
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    /// The feature index of a term, if it is in the vocabulary
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Transform a single document into a feature vector
    pub fn transform(&self, document: &str) -> Array1<f64> {
        let mut features = Array1::zeros(self.n_features());

        for term in tokenize(document) {
            if let Some(&index) = self.vocabulary.get(&term) {
                features[index] += 1.0;
            }
        }

        features *= &self.idf;

        let norm = features.dot(&features).sqrt();
        if norm > 0.0 {
            features /= norm;
        }

        features
    }

    /// Transform a batch of documents into a dense `(n_documents, n_features)` matrix
    pub fn transform_batch<S: AsRef<str>>(&self, documents: &[S]) -> Array2<f64> {
        let mut matrix = Array2::zeros((documents.len(), self.n_features()));

        for (mut row, document) in matrix.rows_mut().into_iter().zip(documents) {
            row.assign(&self.transform(document.as_ref()));
        }

        matrix
    }
}

/// Vectorizer Error
#[derive(thiserror::Error, Debug)]
pub enum VectorizerError {
    /// The corpus produced no tokens at all
    #[error("empty vocabulary; the documents contain no usable terms")]
    EmptyVocabulary,

    /// A vocabulary cap of zero was requested
    #[error("max_features must be at least 1")]
    NoFeatures,
}
