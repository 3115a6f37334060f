use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::{
    fs::{self, OpenOptions},
    io::AsyncWriteExt,
    sync::RwLock,
};

use super::record::CommentRecord;

/// A key-value table of analyzed comments, keyed by `comment_id`
#[async_trait]
pub trait CommentTable: Send + Sync {
    /// Store a record as a new item
    async fn put_item(&self, record: &CommentRecord) -> Result<(), TableError>;
}

/// An append-only table backed by a JSON Lines file
#[derive(Clone, Debug)]
pub struct JsonLinesTable {
    path: PathBuf,
}

impl JsonLinesTable {
    /// The table `name`, stored as `<dir>/<name>.jsonl`
    pub fn new(dir: impl AsRef<Path>, name: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.jsonl", name)),
        }
    }

    /// The backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record, oldest first
    pub async fn scan(&self) -> Result<Vec<CommentRecord>, TableError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(TableError::from))
            .collect()
    }
}

#[async_trait]
impl CommentTable for JsonLinesTable {
    async fn put_item(&self, record: &CommentRecord) -> Result<(), TableError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        // One write per record keeps lines whole
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

/// An in-process table
#[derive(Debug, Default)]
pub struct MemoryTable {
    items: RwLock<HashMap<String, CommentRecord>>,
}

impl MemoryTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a record by id
    pub async fn get_item(&self, comment_id: &str) -> Option<CommentRecord> {
        self.items.read().await.get(comment_id).cloned()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether nothing has been stored
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl CommentTable for MemoryTable {
    async fn put_item(&self, record: &CommentRecord) -> Result<(), TableError> {
        self.items
            .write()
            .await
            .insert(record.comment_id.clone(), record.clone());

        Ok(())
    }
}

/// Table Error
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    /// The backing storage could not be accessed
    #[error("table storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded
    #[error("invalid table record: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::pipelines::text_classification::{Confidence, Sentiment};

    fn record(id: &str) -> CommentRecord {
        CommentRecord {
            comment_id: id.to_string(),
            timestamp: "2024-03-09T07:05:01.000000Z".to_string(),
            original_comment: "fine".to_string(),
            sentiment: Sentiment::Negative,
            confidence: Confidence::Low,
            score: "0.6".to_string(),
        }
    }

    #[tokio::test]
    async fn test_json_lines_table_appends() {
        let dir = tempfile::tempdir().unwrap();
        let table = JsonLinesTable::new(dir.path().join("tables"), "comments");

        assert_eq!(table.scan().await.unwrap(), Vec::new());

        table.put_item(&record("a")).await.unwrap();
        table.put_item(&record("b")).await.unwrap();

        assert_eq!(table.scan().await.unwrap(), vec![record("a"), record("b")]);
        assert!(table.path().ends_with("tables/comments.jsonl"));
    }

    #[tokio::test]
    async fn test_json_lines_table_unwritable() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        // A regular file where the table directory should be
        let table = JsonLinesTable::new(&blocker, "comments");

        assert!(matches!(
            table.put_item(&record("a")).await,
            Err(TableError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_table() {
        let table = MemoryTable::new();
        assert!(table.is_empty().await);

        table.put_item(&record("a")).await.unwrap();

        assert_eq!(table.len().await, 1);
        assert_eq!(table.get_item("a").await, Some(record("a")));
        assert_eq!(table.get_item("b").await, None);
    }
}
