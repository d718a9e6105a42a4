use std::fmt;
use std::time::Duration;

pub type BlockrayResult<T> = Result<T, BlockrayError>;

/// Which kind of asset a failed lookup was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Model,
    Texture,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => f.write_str("model"),
            Self::Texture => f.write_str("texture"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum BlockrayError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: AssetKind, id: String },

    #[error("parse error in {id}: {msg}")]
    Parse { id: String, msg: String },

    #[error("invalid resource id: {0}")]
    InvalidId(String),

    #[error("undefined texture '{name}' (known bindings: {})", .available.join(", "))]
    UndefinedTexture { name: String, available: Vec<String> },

    #[error("cyclic parent chain: {}", .chain.join(" -> "))]
    CyclicParent { chain: Vec<String> },

    #[error("render timed out after {0:?}")]
    RenderTimeout(Duration),

    #[error("render worker failed: {0}")]
    Worker(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlockrayError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found(kind: AssetKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn parse(id: impl fmt::Display, msg: impl Into<String>) -> Self {
        Self::Parse {
            id: id.to_string(),
            msg: msg.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
