//! The ingestion handler: receives a comment event, asks the inference service for a
//! sentiment, and stores the combined record.
//!
//! Each event is processed independently with two sequential calls (inference, then
//! the table write). There are no retries and no timeouts, and a retried event gets
//! a new `comment_id`.

/// Handler configuration
pub mod config;

/// HTTP client for the inference service
pub mod client;

/// Event and response envelopes
pub mod event;

/// The event handler
pub mod handler;

/// Stored comment records
pub mod record;

/// Comment tables
pub mod table;

pub use client::{ClientError, HttpSentimentClient, SentimentClient};
pub use config::{Config, ConfigError};
pub use event::{Event, Response};
pub use handler::{Handler, HandlerError};
pub use record::CommentRecord;
pub use table::{CommentTable, JsonLinesTable, MemoryTable, TableError};

/// Build the production handler from its configuration
pub fn from_config(config: &Config) -> Result<Handler<HttpSentimentClient, JsonLinesTable>, ClientError> {
    let client = HttpSentimentClient::new(&config.service_url)?;
    let table = JsonLinesTable::new(&config.table_dir, &config.table_name);

    log::info!(
        "Forwarding comments to {} and storing them in {}",
        client.endpoint(),
        table.path().display()
    );

    Ok(Handler::new(client, table))
}
