//! Delivery seam: a remote file share that receives the cycle's artifacts.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{RadarError, RadarResult};

/// Destination for persisted artifacts.
///
/// Calls arrive in order: one `ensure_destination`, then `put`/`put_text` per artifact.
pub trait DeliverySink {
    fn ensure_destination(&mut self, path: &str) -> RadarResult<()>;
    fn put(&mut self, name: &str, bytes: &[u8]) -> RadarResult<()>;
    fn put_text(&mut self, name: &str, text: &str) -> RadarResult<()>;
}

/// Sink writing into a mounted share directory (`<root>/<remote path>/<name>`).
#[derive(Clone, Debug)]
pub struct DirSink {
    root: PathBuf,
    dest: Option<PathBuf>,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            dest: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn target(&self, name: &str) -> PathBuf {
        self.dest.as_deref().unwrap_or(&self.root).join(name)
    }
}

impl DeliverySink for DirSink {
    fn ensure_destination(&mut self, path: &str) -> RadarResult<()> {
        let dest = self.root.join(path.trim_matches('/'));
        // Later puts go to `dest` even if creating it fails here; they will report their own errors.
        self.dest = Some(dest.clone());
        std::fs::create_dir_all(&dest)
            .with_context(|| format!("create destination '{}'", dest.display()))
            .map_err(|e| RadarError::delivery(format!("{e:#}")))
    }

    fn put(&mut self, name: &str, bytes: &[u8]) -> RadarResult<()> {
        let path = self.target(name);
        std::fs::write(&path, bytes)
            .map_err(|e| RadarError::delivery(format!("write '{}': {e}", path.display())))
    }

    fn put_text(&mut self, name: &str, text: &str) -> RadarResult<()> {
        self.put(name, text.as_bytes())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub destination: Option<String>,
    /// Delivered files, keyed by name.
    pub files: BTreeMap<String, Vec<u8>>,
    /// Names in delivery order.
    pub order: Vec<String>,
    failing: Vec<String>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every put of `name` fail.
    pub fn fail_on(&mut self, name: &str) {
        self.failing.push(name.to_string());
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.files
            .get(name)
            .and_then(|b| std::str::from_utf8(b).ok())
    }
}

impl DeliverySink for InMemorySink {
    fn ensure_destination(&mut self, path: &str) -> RadarResult<()> {
        self.destination = Some(path.to_string());
        Ok(())
    }

    fn put(&mut self, name: &str, bytes: &[u8]) -> RadarResult<()> {
        if self.failing.iter().any(|n| n == name) {
            return Err(RadarError::delivery(format!("put '{name}' refused")));
        }
        self.files.insert(name.to_string(), bytes.to_vec());
        self.order.push(name.to_string());
        Ok(())
    }

    fn put_text(&mut self, name: &str, text: &str) -> RadarResult<()> {
        self.put(name, text.as_bytes())
    }
}

/// One named file handed to a sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Outcome counts of a best-effort delivery.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Hand `artifacts` and then the text note to `sink`.
///
/// Best effort: a failed destination setup or file is logged and the rest still go out.
pub fn deliver(
    sink: &mut dyn DeliverySink,
    destination: &str,
    artifacts: &[Artifact],
    note: Option<(&str, &str)>,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    if artifacts.is_empty() {
        tracing::warn!("no files to transfer");
        return report;
    }

    if let Err(err) = sink.ensure_destination(destination) {
        tracing::warn!(destination, error = %err, "could not create destination");
    }

    for artifact in artifacts {
        tracing::debug!(name = %artifact.name, "transferring");
        match sink.put(&artifact.name, &artifact.bytes) {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                report.failed += 1;
                tracing::error!(name = %artifact.name, error = %err, "failed to transfer");
            }
        }
    }
    tracing::info!(
        delivered = report.delivered,
        failed = report.failed,
        destination,
        "transferred files"
    );

    if let Some((name, text)) = note {
        match sink.put_text(name, text) {
            Ok(()) => {
                report.delivered += 1;
                tracing::info!(name, "wrote timestamp file");
            }
            Err(err) => {
                report.failed += 1;
                tracing::error!(name, error = %err, "failed to write timestamp file");
            }
        }
    }
    report
}

#[cfg(test)]
#[path = "../../tests/unit/delivery/mod.rs"]
mod tests;
