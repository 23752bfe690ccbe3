use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use balance_core::storage::{KvStore, StoreError};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::codec::{Codec, PlainCodec, SealedCodec};
use crate::key_provider::KeyProvider;

/// One file per key under `root`, passed through a [`Codec`].
pub struct FileStore<C: Codec> {
    root: PathBuf,
    codec: C,
}

impl FileStore<PlainCodec> {
    pub fn plain(root: impl Into<PathBuf>) -> Self {
        Self::new(root, PlainCodec)
    }
}

impl<P: KeyProvider> FileStore<SealedCodec<P>> {
    pub fn sealed(root: impl Into<PathBuf>, key_provider: P) -> Self {
        Self::new(root, SealedCodec::new(key_provider))
    }
}

impl<C: Codec> FileStore<C> {
    pub fn new(root: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            root: root.into(),
            codec,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_stem(key)))
    }
}

impl<C: Codec> KvStore for FileStore<C> {
    #[instrument(skip_all, fields(key = %key))]
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let encoded = self.codec.encode(value).map_err(StoreError::storage)?;
        let path = self.path_for(key);
        write_atomic(&path, &encoded)?;
        debug!(path = %path.display(), bytes = encoded.len(), "value written");
        Ok(())
    }

    #[instrument(skip_all, fields(key = %key))]
    fn get(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let stored = match fs::read(self.path_for(key)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    key: key.to_string(),
                })
            }
            Err(err) => return Err(StoreError::storage(err)),
        };
        self.codec.decode(&stored).map_err(StoreError::storage)
    }

    #[instrument(skip_all, fields(key = %key))]
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::storage(err)),
        }
    }
}

/// Temp file in the target directory, then rename over the destination.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let parent = path
        .parent()
        .ok_or_else(|| StoreError::storage("invalid storage path"))?;
    fs::create_dir_all(parent).map_err(StoreError::storage)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(StoreError::storage)?;
    tmp.write_all(bytes).map_err(StoreError::storage)?;
    tmp.flush().map_err(StoreError::storage)?;
    tmp.persist(path).map_err(|e| StoreError::storage(e.error))?;
    Ok(())
}

fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
