use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serialize `doc` as YAML and write it to `path`, creating parent directories.
pub fn write_yaml<T: Serialize>(path: &Path, doc: &T) -> Result<(), WriteError> {
    let io_err = |source| WriteError::Io {
        path: path.display().to_string(),
        source,
    };

    let content = serde_yaml::to_string(doc)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    fs::write(path, content).map_err(io_err)
}
