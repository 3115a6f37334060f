use chrono::Utc;

use super::{
    client::{ClientError, SentimentClient},
    event::{CommentBody, Event, Response},
    record::{new_comment_id, CommentRecord},
    table::{CommentTable, TableError},
};

/// Body of the 400 response for a missing comment
pub static MISSING_COMMENT: &str = "No 'comment' field in body";

/// Body of the 500 response when analysis fails
pub static ANALYSIS_FAILED: &str = "Could not analyze sentiment.";

/// Body of the 500 response when the record cannot be stored
pub static SAVE_FAILED: &str = "Could not save comment to database.";

/// Forwards comments to the inference service and stores the results
pub struct Handler<C, T> {
    client: C,
    table: T,
}

impl<C: SentimentClient, T: CommentTable> Handler<C, T> {
    /// Build a handler over a client and a table
    pub fn new(client: C, table: T) -> Self {
        Self { client, table }
    }

    /// The table records are written to
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Process one event. Every failure is terminal for the event; nothing is retried.
    pub async fn handle(&self, event: Event) -> Response {
        match self.process(event).await {
            Ok(record) => Response::json(200, &record),
            Err(err) => {
                match &err {
                    HandlerError::MissingComment => log::warn!("Rejected event: {}", err),
                    HandlerError::Persistence(e) => log::error!("Error saving comment: {}", e),
                    _ => log::error!("Error calling sentiment service: {}", err),
                }

                err.into_response()
            }
        }
    }

    async fn process(&self, event: Event) -> Result<CommentRecord, HandlerError> {
        let body: CommentBody = match event.body.as_deref() {
            Some(raw) => match serde_json::from_str(raw)? {
                value @ serde_json::Value::Object(_) => serde_json::from_value(value)?,
                _ => return Err(HandlerError::NotAnObject),
            },
            None => CommentBody::default(),
        };

        let comment = body
            .comment
            .filter(|c| !c.is_empty())
            .ok_or(HandlerError::MissingComment)?;

        let comment_id = new_comment_id();
        let prediction = self.client.analyze(&comment).await?;

        let record = CommentRecord::new(comment_id, Utc::now(), prediction);
        self.table.put_item(&record).await?;

        log::info!(
            "Stored comment {} ({}, {})",
            record.comment_id,
            record.sentiment,
            record.confidence
        );

        Ok(record)
    }
}

/// Handler Error
#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    /// The event body is not valid JSON
    #[error("invalid event body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The event body is JSON but not an object
    #[error("event body is not a JSON object")]
    NotAnObject,

    /// The body has no usable `comment`
    #[error("no comment in event body")]
    MissingComment,

    /// The inference service could not be reached or answered badly
    #[error(transparent)]
    Sentiment(#[from] ClientError),

    /// The record could not be written
    #[error(transparent)]
    Persistence(#[from] TableError),
}

impl HandlerError {
    /// The client-facing response; internal detail stays in the logs
    pub fn into_response(self) -> Response {
        match self {
            HandlerError::MissingComment => Response::error(400, MISSING_COMMENT),
            HandlerError::InvalidBody(_)
            | HandlerError::NotAnObject
            | HandlerError::Sentiment(_) => {
                Response::error(500, ANALYSIS_FAILED)
            }
            HandlerError::Persistence(_) => Response::error(500, SAVE_FAILED),
        }
    }
}
