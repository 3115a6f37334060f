use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pipelines::text_classification::{Confidence, Prediction, Sentiment};

/// One analyzed comment as stored in the table
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Primary key
    pub comment_id: String,

    /// ISO-8601 UTC time with a trailing `Z`
    pub timestamp: String,

    /// The text as echoed back by the inference service
    pub original_comment: String,

    /// Predicted polarity
    pub sentiment: Sentiment,

    /// Confidence band
    pub confidence: Confidence,

    /// Predicted-class probability as decimal text
    pub score: String,
}

impl CommentRecord {
    /// Combine an id, a timestamp and an inference result into a record
    pub fn new(comment_id: String, at: DateTime<Utc>, prediction: Prediction) -> Self {
        Self {
            comment_id,
            timestamp: format_timestamp(at),
            original_comment: prediction.text,
            sentiment: prediction.sentiment,
            confidence: prediction.confidence,
            score: score_to_text(prediction.score),
        }
    }
}

/// A fresh random comment identifier
pub fn new_comment_id() -> String {
    Uuid::new_v4().to_string()
}

/// Format as `YYYY-MM-DDTHH:MM:SS.ffffffZ`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Render a score as the shortest decimal text that parses back to the same value.
///
/// Whole numbers keep a fractional digit (`1.0`), so the column always reads as a
/// decimal rather than an integer.
pub fn score_to_text(score: f64) -> String {
    format!("{:?}", score)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_score_to_text() {
        assert_eq!(score_to_text(0.82), "0.82");
        assert_eq!(score_to_text(0.595), "0.595");
        assert_eq!(score_to_text(1.0), "1.0");
        assert_eq!(score_to_text(0.8234567891234), "0.8234567891234");
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();

        assert_eq!(format_timestamp(at), "2024-03-09T07:05:01.000000Z");
    }

    #[test]
    fn test_record_from_prediction() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let prediction = Prediction {
            text: "great movie".to_string(),
            sentiment: Sentiment::Positive,
            score: 0.82,
            confidence: Confidence::High,
        };

        let record = CommentRecord::new("id-1".to_string(), at, prediction);

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({
                "comment_id": "id-1",
                "timestamp": "2024-03-09T07:05:01.000000Z",
                "original_comment": "great movie",
                "sentiment": "positive",
                "confidence": "high",
                "score": "0.82"
            })
        );
    }

    #[test]
    fn test_comment_ids_are_unique() {
        assert_ne!(new_comment_id(), new_comment_id());
    }
}
