//! File-backed resource store for the `/files/*` routes.

use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Why a store operation failed.
///
/// `Refused` means the supplied name was never allowed near the
/// filesystem; `Io` is a real filesystem failure on an accepted path.
/// Read handlers collapse both to 404, write handlers answer 404 for
/// `Refused` and 500 for `Io`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Name is empty, absolute, or escapes the store root.
    #[error("refused file name")]
    Refused,
    /// Open/stat/create/write failure.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Store rooted at the directory given with `--directory`.
///
/// Names arrive verbatim from the request path. They are reduced to
/// their normal components before the root is joined, so `..` hops,
/// absolute paths and empty names can never reach outside the root.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request-supplied name to a path under the root, or refuses.
    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        let mut clean = PathBuf::new();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => clean.push(part),
                Component::CurDir => {}
                // ParentDir, RootDir or a prefix would leave the root.
                _ => return Err(StoreError::Refused),
            }
        }
        if clean.as_os_str().is_empty() {
            return Err(StoreError::Refused);
        }
        Ok(self.root.join(clean))
    }

    /// Opens a stored file for reading, returning it with its size.
    pub async fn open(&self, name: &str) -> Result<(File, u64), StoreError> {
        let path = self.resolve(name)?;
        let file = File::open(&path).await?;
        let meta = file.metadata().await?;
        if !meta.is_file() {
            return Err(StoreError::Refused);
        }
        Ok((file, meta.len()))
    }

    /// Writes `data` to the named file, replacing any existing content.
    pub async fn save(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
        let path = self.resolve(name)?;
        let mut file = File::create(&path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        Ok(())
    }
}
