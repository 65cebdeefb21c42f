use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{BankQuestion, VocabularyItem};

/// Errors raised while reading quiz data files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} must contain at least one entry", .path.display())]
    Empty { path: PathBuf },
}

fn load_json_list<T, P>(path: P) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let entries: Vec<T> =
        serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if entries.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    log::debug!("loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Load vocabulary entries from a JSON array.
pub fn load_vocabulary_from_json<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<VocabularyItem>, LoadError> {
    load_json_list(path)
}

/// Load a pre-built question bank from a JSON array.
pub fn load_bank_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<BankQuestion>, LoadError> {
    load_json_list(path)
}

/// Load the surface forms a learner marked as unfamiliar.
pub fn load_surface_list_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    load_json_list(path)
}
