//! Twin registry: resolves a twin id to its registered public key.

use std::path::Path;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("twin {0} not found")]
    NotFound(u32),
    #[error("registry unavailable: {0}")]
    Unavailable(String),
    #[error("invalid twin directory: {0}")]
    InvalidDirectory(String),
}

/// A registered twin. The key carries no scheme of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Twin {
    pub id: u32,
    pub public_key: Vec<u8>,
}

#[async_trait]
pub trait TwinRegistry: Send + Sync {
    async fn get_twin(&self, twin_id: u32) -> Result<Twin, RegistryError>;
}

#[async_trait]
impl<R: TwinRegistry + ?Sized> TwinRegistry for std::sync::Arc<R> {
    async fn get_twin(&self, twin_id: u32) -> Result<Twin, RegistryError> {
        (**self).get_twin(twin_id).await
    }
}

/// Registry backed by a concurrent in-memory map.
#[derive(Debug, Default)]
pub struct MemoryTwinRegistry {
    twins: DashMap<u32, Vec<u8>>,
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    twins: Vec<DirectoryEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    id: u32,
    public_key: String,
}

impl MemoryTwinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a twin's public key.
    pub fn insert(&self, twin_id: u32, public_key: impl Into<Vec<u8>>) {
        self.twins.insert(twin_id, public_key.into());
    }

    pub fn remove(&self, twin_id: u32) -> Option<Twin> {
        self.twins
            .remove(&twin_id)
            .map(|(id, public_key)| Twin { id, public_key })
    }

    pub fn len(&self) -> usize {
        self.twins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.twins.is_empty()
    }

    /// Load a twin directory file. `.json` files are parsed as JSON,
    /// everything else as TOML.
    ///
    /// ```toml
    /// [[twins]]
    /// id = 7
    /// public_key = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::Unavailable(format!("could not read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let directory: DirectoryFile = if is_json {
            serde_json::from_str(&content).map_err(|e| RegistryError::InvalidDirectory(e.to_string()))?
        } else {
            toml::from_str(&content).map_err(|e| RegistryError::InvalidDirectory(e.to_string()))?
        };

        Self::from_entries(directory.twins)
    }

    fn from_entries(entries: Vec<DirectoryEntry>) -> Result<Self, RegistryError> {
        let registry = Self::new();
        for entry in entries {
            let key = hex::decode(entry.public_key.trim_start_matches("0x")).map_err(|e| {
                RegistryError::InvalidDirectory(format!("twin {}: bad public key hex: {}", entry.id, e))
            })?;
            if registry.twins.insert(entry.id, key).is_some() {
                return Err(RegistryError::InvalidDirectory(format!(
                    "twin {} listed more than once",
                    entry.id
                )));
            }
        }
        tracing::debug!(twins = registry.len(), "loaded twin directory");
        Ok(registry)
    }
}

#[async_trait]
impl TwinRegistry for MemoryTwinRegistry {
    async fn get_twin(&self, twin_id: u32) -> Result<Twin, RegistryError> {
        self.twins
            .get(&twin_id)
            .map(|key| Twin {
                id: twin_id,
                public_key: key.value().clone(),
            })
            .ok_or(RegistryError::NotFound(twin_id))
    }
}
