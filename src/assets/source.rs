use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use include_dir::{Dir, include_dir};
use parking_lot::Mutex;

use crate::foundation::error::{BlockrayError, BlockrayResult};

static BUNDLED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/bundled");

/// Byte lookup over one asset bundle.
///
/// `rel` is always a normalized, forward-slash path such as
/// `assets/minecraft/models/block/cube.json`. A missing entry is `Ok(None)`; errors are
/// reserved for entries that exist but cannot be read.
pub trait AssetSource: Send + Sync + fmt::Debug {
    fn open(&self, rel: &str) -> BlockrayResult<Option<Vec<u8>>>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Unpacked resource pack on disk.
#[derive(Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> BlockrayResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(BlockrayError::config(format!(
                "resource pack directory '{}' does not exist",
                root.display()
            )));
        }
        Ok(Self { root })
    }
}

impl AssetSource for DirectorySource {
    fn open(&self, rel: &str) -> BlockrayResult<Option<Vec<u8>>> {
        let path = self.root.join(rel);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes =
            std::fs::read(&path).with_context(|| format!("read asset '{}'", path.display()))?;
        Ok(Some(bytes))
    }

    fn describe(&self) -> String {
        format!("dir:{}", self.root.display())
    }
}

/// Zipped resource pack. Entry reads are serialized on the archive handle.
pub struct ArchiveSource {
    path: PathBuf,
    archive: Mutex<zip::ZipArchive<File>>,
}

impl ArchiveSource {
    pub fn open_file(path: impl AsRef<Path>) -> BlockrayResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open resource pack archive '{}'", path.display()))?;
        let archive = zip::ZipArchive::new(file).map_err(|e| {
            BlockrayError::config(format!(
                "'{}' is not a readable zip archive: {e}",
                path.display()
            ))
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            archive: Mutex::new(archive),
        })
    }
}

impl fmt::Debug for ArchiveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl AssetSource for ArchiveSource {
    fn open(&self, rel: &str) -> BlockrayResult<Option<Vec<u8>>> {
        let mut archive = self.archive.lock();
        let mut entry = match archive.by_name(rel) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("read '{rel}' from '{}'", self.path.display()))
                    .into());
            }
        };
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .with_context(|| format!("inflate '{rel}' from '{}'", self.path.display()))?;
        Ok(Some(bytes))
    }

    fn describe(&self) -> String {
        format!("zip:{}", self.path.display())
    }
}

/// Default models compiled into the crate.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    dir: &'static Dir<'static>,
}

impl EmbeddedSource {
    pub fn bundled() -> Self {
        Self { dir: &BUNDLED }
    }
}

impl AssetSource for EmbeddedSource {
    fn open(&self, rel: &str) -> BlockrayResult<Option<Vec<u8>>> {
        Ok(self.dir.get_file(rel).map(|f| f.contents().to_vec()))
    }

    fn describe(&self) -> String {
        "embedded".to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
