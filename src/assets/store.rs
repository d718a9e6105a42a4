use std::path::Path;

use crate::assets::source::{ArchiveSource, AssetSource, DirectorySource, EmbeddedSource};
use crate::foundation::core::ResourceId;
use crate::foundation::error::{AssetKind, BlockrayError, BlockrayResult};

/// Ordered stack of asset sources; the first source holding a path wins.
#[derive(Debug, Default)]
pub struct AssetStore {
    sources: Vec<Box<dyn AssetSource>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays in the order given, then the embedded bundle when `use_internal` is set.
    ///
    /// Each overlay must be a directory or a `.zip` file; anything else is rejected here
    /// rather than at lookup time.
    pub fn from_packs<P: AsRef<Path>>(packs: &[P], use_internal: bool) -> BlockrayResult<Self> {
        let mut store = Self::new();
        for pack in packs {
            store = store.with_source(open_overlay(pack.as_ref())?);
        }
        if use_internal {
            store = store.with_source(Box::new(EmbeddedSource::bundled()));
        }
        Ok(store)
    }

    pub fn with_source(mut self, source: Box<dyn AssetSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn open(&self, rel: &str) -> BlockrayResult<Option<Vec<u8>>> {
        let rel = normalize_rel_path(rel)?;
        for source in &self.sources {
            if let Some(bytes) = source.open(&rel)? {
                tracing::debug!(path = %rel, source = %source.describe(), "asset hit");
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }

    pub fn open_model(&self, id: &ResourceId) -> BlockrayResult<Vec<u8>> {
        self.open(&id.model_path())?
            .ok_or_else(|| BlockrayError::not_found(AssetKind::Model, id))
    }

    pub fn open_texture(&self, id: &ResourceId) -> BlockrayResult<Vec<u8>> {
        self.open(&id.texture_path())?
            .ok_or_else(|| BlockrayError::not_found(AssetKind::Texture, id))
    }
}

fn open_overlay(path: &Path) -> BlockrayResult<Box<dyn AssetSource>> {
    if path.is_dir() {
        return Ok(Box::new(DirectorySource::new(path)?));
    }
    let is_zip = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip && path.is_file() {
        return Ok(Box::new(ArchiveSource::open_file(path)?));
    }
    Err(BlockrayError::config(format!(
        "unsupported resource pack '{}': expected a directory or a .zip archive",
        path.display()
    )))
}

/// Normalizes a bundle-relative path to forward slashes, dropping `.` segments.
///
/// Absolute paths and `..` segments are rejected so lookups can never leave a source root.
pub fn normalize_rel_path(source: &str) -> BlockrayResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BlockrayError::invalid_id(format!(
            "asset path '{source}' must be relative"
        )));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BlockrayError::invalid_id(format!(
                "asset path '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BlockrayError::invalid_id("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
