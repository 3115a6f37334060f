use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// The IMDB movie review dataset
pub mod imdb;

/// Split a set of items into shuffled `(train, test)` partitions.
///
/// The test partition holds `ceil(test_size * n)` items. The shuffle is driven by a
/// seeded RNG, so the same seed and input always produce the same split.
pub fn train_test_split<T: Clone>(
    items: &[T],
    test_size: f64,
    seed: u64,
) -> Result<(Vec<T>, Vec<T>), DatasetError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(DatasetError::InvalidTestSize(test_size));
    }

    let n_test = (test_size * items.len() as f64).ceil() as usize;
    let n_train = items.len().saturating_sub(n_test);

    if n_train == 0 || n_test == 0 {
        return Err(DatasetError::TooSmall(items.len()));
    }

    let mut indices: Vec<usize> = (0..items.len()).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    let train = train_idx.iter().map(|&i| items[i].clone()).collect();
    let test = test_idx.iter().map(|&i| items[i].clone()).collect();

    Ok((train, test))
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The underlying CSV could not be read or decoded
    #[error("unable to read dataset: {0}")]
    Csv(#[from] csv::Error),

    /// A row carried a label outside of {0, 1}
    #[error("invalid sentiment label {label} in record {record}")]
    InvalidLabel {
        /// 1-based record number, not counting the header
        record: usize,
        /// The offending label
        label: u8,
    },

    /// The dataset contained no rows
    #[error("dataset is empty")]
    Empty,

    /// The requested test fraction was outside of (0, 1)
    #[error("test size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),

    /// Not enough rows to populate both partitions
    #[error("{0} rows are not enough for a train/test split")]
    TooSmall(usize),
}
