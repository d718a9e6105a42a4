use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{BlockrayError, BlockrayResult};

pub use glam::DVec3;

/// Namespace used when an id string carries no `namespace:` prefix.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespaced asset identifier (`namespace:path`).
///
/// Equality, ordering and hashing all go through the canonical `namespace:path` string, so
/// `stone`, `minecraft:stone` and `:stone` name the same resource.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId {
    canonical: String,
    split: usize,
}

impl ResourceId {
    pub fn parse(s: &str) -> BlockrayResult<Self> {
        let (namespace, path) = match s.split_once(':') {
            Some(("", path)) => (DEFAULT_NAMESPACE, path),
            Some((ns, path)) => (ns, path),
            None => (DEFAULT_NAMESPACE, s),
        };

        if path.is_empty() {
            return Err(BlockrayError::invalid_id(format!("'{s}' has an empty path")));
        }
        if let Some(c) = namespace.chars().find(|&c| !is_namespace_char(c)) {
            return Err(BlockrayError::invalid_id(format!(
                "'{s}' has illegal character {c:?} in its namespace"
            )));
        }
        if let Some(c) = path.chars().find(|&c| !is_path_char(c)) {
            return Err(BlockrayError::invalid_id(format!(
                "'{s}' has illegal character {c:?} in its path"
            )));
        }

        Ok(Self::from_parts(namespace, path))
    }

    fn from_parts(namespace: &str, path: &str) -> Self {
        Self {
            canonical: format!("{namespace}:{path}"),
            split: namespace.len(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.canonical[..self.split]
    }

    pub fn path(&self) -> &str {
        &self.canonical[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// `assets/<namespace>/models/<path>.json`
    pub fn model_path(&self) -> String {
        format!("assets/{}/models/{}.json", self.namespace(), self.path())
    }

    /// `assets/<namespace>/textures/<path>.png`
    pub fn texture_path(&self) -> String {
        format!("assets/{}/textures/{}.png", self.namespace(), self.path())
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl FromStr for ResourceId {
    type Err = BlockrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({})", self.canonical)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> BlockrayResult<Self> {
        if width == 0 || height == 0 {
            return Err(BlockrayError::config(format!(
                "canvas size must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
