//! # Sentiment Pipeline
//!
//! Train a TF-IDF + logistic regression sentiment classifier, serve it over HTTP, and
//! persist analyzed comments through an event handler.
#![deny(unsafe_code)]

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// The HTTP inference service
pub mod service;

/// The comment ingestion handler
pub mod ingestion;
