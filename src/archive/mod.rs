//! Remote archive seam: directory listing plus per-item fetch.
//!
//! Listing failures are fatal to a cycle; per-item fetch failures are skippable. Implementations
//! must keep the two distinguishable by returning errors from the matching method.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{RadarError, RadarResult};

/// Source of sweep images and layer transparencies.
pub trait Archive {
    /// Entry names in `directory`, in archive order.
    fn list(&self, directory: &str) -> RadarResult<Vec<String>>;

    /// Raw bytes of `name` inside `directory`.
    fn fetch(&self, directory: &str, name: &str) -> RadarResult<Vec<u8>>;
}

/// Archive mirrored onto a local directory tree (`<root>/<directory>/<name>`).
#[derive(Clone, Debug)]
pub struct DirArchive {
    root: PathBuf,
}

impl DirArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir_path(&self, directory: &str) -> PathBuf {
        self.root.join(directory.trim_matches('/'))
    }
}

impl Archive for DirArchive {
    fn list(&self, directory: &str) -> RadarResult<Vec<String>> {
        let dir = self.dir_path(directory);
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("list archive directory '{}'", dir.display()))
            .map_err(|e| RadarError::archive(format!("{e:#}")))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                RadarError::archive(format!("read entry in '{}': {e}", dir.display()))
            })?;
            if entry.path().is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        // read_dir order is platform-defined; name order keeps listings reproducible.
        names.sort();
        Ok(names)
    }

    fn fetch(&self, directory: &str, name: &str) -> RadarResult<Vec<u8>> {
        let path = self.dir_path(directory).join(name);
        std::fs::read(&path)
            .map_err(|e| RadarError::archive(format!("fetch '{}': {e}", path.display())))
    }
}

/// In-memory archive for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryArchive {
    dirs: BTreeMap<String, Vec<(String, Vec<u8>)>>,
    broken_listings: Vec<String>,
    broken_items: Vec<String>,
}

impl InMemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` to `directory`, after any existing entries.
    pub fn insert(&mut self, directory: &str, name: &str, bytes: Vec<u8>) {
        self.dirs
            .entry(directory.to_string())
            .or_default()
            .push((name.to_string(), bytes));
    }

    /// Make listing `directory` fail.
    pub fn fail_listing(&mut self, directory: &str) {
        self.broken_listings.push(directory.to_string());
    }

    /// Keep `name` in listings but make fetching it fail.
    pub fn fail_fetch(&mut self, name: &str) {
        self.broken_items.push(name.to_string());
    }
}

impl Archive for InMemoryArchive {
    fn list(&self, directory: &str) -> RadarResult<Vec<String>> {
        if self.broken_listings.iter().any(|d| d == directory) {
            return Err(RadarError::archive(format!(
                "listing '{directory}' failed"
            )));
        }
        Ok(self
            .dirs
            .get(directory)
            .map(|entries| entries.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default())
    }

    fn fetch(&self, directory: &str, name: &str) -> RadarResult<Vec<u8>> {
        if self.broken_items.iter().any(|n| n == name) {
            return Err(RadarError::archive(format!("fetch '{name}' failed")));
        }
        self.dirs
            .get(directory)
            .and_then(|entries| entries.iter().find(|(n, _)| n == name))
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| RadarError::archive(format!("'{directory}/{name}' not found")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/archive/mod.rs"]
mod tests;
