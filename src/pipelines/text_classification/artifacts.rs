use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use super::{model::LogisticRegression, vectorizer::TfidfVectorizer};

/// The default directory artifacts are written to and read from
pub static DEFAULT_ARTIFACT_DIR: &str = "models";

/// File name of the serialized classifier
pub static MODEL_FILE: &str = "logistic_regression_model.json";

/// File name of the serialized vectorizer
pub static VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

/// File name of the training configuration saved next to the artifacts
pub static CONFIG_FILE: &str = "config.json";

/// Write both artifacts into `artifact_dir`, creating it if needed
pub fn save(
    artifact_dir: impl AsRef<Path>,
    vectorizer: &TfidfVectorizer,
    model: &LogisticRegression,
) -> Result<(), ArtifactError> {
    let dir = artifact_dir.as_ref();

    fs::create_dir_all(dir).map_err(|source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    write_json(&dir.join(MODEL_FILE), model)?;
    write_json(&dir.join(VECTORIZER_FILE), vectorizer)?;

    Ok(())
}

/// Read both artifacts from `artifact_dir`
pub fn load(
    artifact_dir: impl AsRef<Path>,
) -> Result<(TfidfVectorizer, LogisticRegression), ArtifactError> {
    let dir = artifact_dir.as_ref();

    let model: LogisticRegression = read_json(&dir.join(MODEL_FILE))?;
    let vectorizer: TfidfVectorizer = read_json(&dir.join(VECTORIZER_FILE))?;

    if vectorizer.n_features() != model.n_features() {
        log::warn!(
            "Artifacts in {} disagree: vectorizer yields {} features, model expects {}",
            dir.display(),
            vectorizer.n_features(),
            model.n_features()
        );
    }

    Ok((vectorizer, model))
}

/// Serialize a value as pretty JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let json = serde_json::to_string_pretty(value).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize a value from a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Artifact Error
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    /// Reading or writing an artifact file failed
    #[error("unable to access {path}: {source}")]
    Io {
        /// The artifact path
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// An artifact could not be (de)serialized
    #[error("invalid artifact {path}: {source}")]
    Json {
        /// The artifact path
        path: PathBuf,
        /// The underlying error
        source: serde_json::Error,
    },
}
