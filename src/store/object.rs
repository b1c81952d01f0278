use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;

use crate::assets::locator::AssetRef;
use crate::foundation::error::{PfpError, PfpResult};

/// Read access to the asset store.
///
/// Folders follow the `root/category` convention, mirrored under one root per resolution tier.
/// Implementations must be shareable across threads: the compositor fetches layers in parallel.
pub trait ObjectStore: Send + Sync {
    /// List the assets stored directly in `folder`.
    fn list(&self, folder: &str) -> PfpResult<Vec<AssetRef>>;
    /// Resolve a locator to a downloadable URL.
    fn resolve(&self, asset: &AssetRef) -> PfpResult<String>;
    /// Download the encoded bytes of an asset.
    fn fetch(&self, asset: &AssetRef) -> PfpResult<Vec<u8>>;
}

fn folder_prefix(folder: &str) -> String {
    format!("{}/", folder.trim_end_matches('/'))
}

/// In-memory store for tests and debugging.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    objects: BTreeMap<String, Vec<u8>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under the locator's object path.
    pub fn insert(&mut self, asset: &AssetRef, bytes: Vec<u8>) {
        self.objects.insert(asset.path(), bytes);
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Return `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for InMemoryStore {
    fn list(&self, folder: &str) -> PfpResult<Vec<AssetRef>> {
        let prefix = folder_prefix(folder);
        self.objects
            .keys()
            .filter(|k| k.strip_prefix(&prefix).is_some_and(|rest| !rest.contains('/')))
            .map(|k| AssetRef::parse_path(k))
            .collect()
    }

    fn resolve(&self, asset: &AssetRef) -> PfpResult<String> {
        Ok(format!("memory://{}", asset.path()))
    }

    fn fetch(&self, asset: &AssetRef) -> PfpResult<Vec<u8>> {
        self.objects
            .get(&asset.path())
            .cloned()
            .ok_or_else(|| PfpError::validation(format!("no object at \"{asset}\"")))
    }
}

/// Store backed by a local directory that mirrors the bucket layout.
#[derive(Debug, Clone)]
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    /// Serve objects from `root`, so `LD_ASSETS/body/x.png` maps to `root/LD_ASSETS/body/x.png`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, asset: &AssetRef) -> PathBuf {
        self.root.join(asset.path())
    }
}

impl ObjectStore for LocalDirStore {
    fn list(&self, folder: &str) -> PfpResult<Vec<AssetRef>> {
        let prefix = folder_prefix(folder);
        let dir = self.root.join(&prefix);
        let read = std::fs::read_dir(&dir)
            .with_context(|| format!("read asset dir '{}'", dir.display()))
            .map_err(|e| PfpError::asset_listing(format!("{e:#}")))?;

        let mut names = Vec::new();
        for item in read {
            let item = item.with_context(|| format!("read entry in '{}'", dir.display()))?;
            if !item.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(name) = item.file_name().to_str() {
                names.push(name.to_owned());
            }
        }
        names.sort();

        names
            .into_iter()
            .map(|name| AssetRef::parse_path(&format!("{prefix}{name}")))
            .collect()
    }

    fn resolve(&self, asset: &AssetRef) -> PfpResult<String> {
        let path = self.file_path(asset);
        let abs = std::path::absolute(&path)
            .with_context(|| format!("absolutize '{}'", path.display()))?;
        url::Url::from_file_path(&abs)
            .map(String::from)
            .map_err(|()| PfpError::validation(format!("no file url for '{}'", abs.display())))
    }

    fn fetch(&self, asset: &AssetRef) -> PfpResult<Vec<u8>> {
        let path = self.file_path(asset);
        let bytes = std::fs::read(&path).with_context(|| format!("read '{}'", path.display()))?;
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/object.rs"]
mod tests;
