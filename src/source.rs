//! Inbound inputs supplied by the host: the file to upload and, optionally,
//! the note it is being attached to.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum FileSource {
    Disk(PathBuf),
    Memory(Vec<u8>),
}

/// A single attachment to upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub source: FileSource,
}

impl UploadFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::Config(format!("Invalid file path: {}", path.display())))?
            .to_string();

        Ok(Self {
            name,
            source: FileSource::Disk(path),
        })
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Memory(bytes),
        }
    }

    /// Read the whole file into memory.
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            FileSource::Disk(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| Error::FileRead {
                        path: path.clone(),
                        source,
                    })
            }
            FileSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Metadata of the note that is active when the upload happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteMeta {
    pub created: DateTime<Utc>,
}

impl NoteMeta {
    pub fn new(created: DateTime<Utc>) -> Self {
        Self { created }
    }

    /// Uses the file's creation time, or its modification time on platforms
    /// that do not record creation.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let timestamp = match metadata.created() {
            Ok(created) => created,
            Err(e) => {
                tracing::debug!(
                    "Creation time unavailable for {} ({}), using modification time",
                    path.display(),
                    e
                );
                metadata.modified()?
            }
        };

        Ok(Self::new(DateTime::<Utc>::from(timestamp)))
    }
}
