use std::path::Path;

use derive_new::new;
use serde::{Deserialize, Serialize};

use super::DatasetError;
use crate::pipelines::text_classification;

/// The name of the IMDB dataset
pub static DATASET: &str = "imdb";

/// A labeled movie review
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, new)]
pub struct Item {
    /// The review text
    pub review: String,

    /// 1 for a positive review, 0 for a negative one
    pub sentiment: u8,
}

impl text_classification::Item for Item {
    fn input(&self) -> &str {
        &self.review
    }

    fn label(&self) -> u8 {
        self.sentiment
    }
}

/// Struct for the IMDB dataset
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    items: Vec<Item>,
}

impl Dataset {
    /// Load the dataset from a CSV file with `review` and `sentiment` columns
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path.as_ref())?;

        let mut items = Vec::new();
        for (index, row) in reader.deserialize::<Item>().enumerate() {
            let item = row?;

            if item.sentiment > 1 {
                return Err(DatasetError::InvalidLabel {
                    record: index + 1,
                    label: item.sentiment,
                });
            }

            items.push(item);
        }

        if items.is_empty() {
            return Err(DatasetError::Empty);
        }

        log::info!(
            "Loaded {} {} reviews from {}",
            items.len(),
            DATASET,
            path.as_ref().display()
        );

        Ok(Self { items })
    }

    /// Returns a specific item from the dataset
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Returns the length of the dataset
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All rows, in file order
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl From<Vec<Item>> for Dataset {
    fn from(items: Vec<Item>) -> Self {
        Self { items }
    }
}
