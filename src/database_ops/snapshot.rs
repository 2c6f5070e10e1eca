//! On-disk JSON snapshot of every known demo.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::database_ops::error::ImportError;
use crate::models::Demo;
use crate::normalization::normalize_url;

/// Contents of a snapshot file.
///
/// `unrecognized` holds array elements that could not be read as a [`Demo`]
/// (no `id` or `url`, wrong types). They are written back untouched after the
/// demos so an import never drops records it does not understand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub demos: Vec<Demo>,
    pub unrecognized: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file, an unreadable file or text that is
    /// not a JSON array yields an empty snapshot. Inside a valid array each
    /// record is read on its own, so one bad record never hides the others.
    pub fn load(&self) -> Snapshot {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot yet; starting empty");
                return Snapshot::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "snapshot unreadable; starting empty");
                return Snapshot::default();
            }
        };
        let elements = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(elements) => elements,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "snapshot is not a JSON array; starting empty");
                return Snapshot::default();
            }
        };

        let mut snapshot = Snapshot::default();
        for (index, element) in elements.into_iter().enumerate() {
            match read_demo(&element) {
                Ok(demo) => snapshot.demos.push(demo),
                Err(reason) => {
                    warn!(path = %self.path.display(), index, %reason, "keeping unreadable snapshot record as-is");
                    snapshot.unrecognized.push(element);
                }
            }
        }
        debug!(
            path = %self.path.display(),
            demos = snapshot.demos.len(),
            unrecognized = snapshot.unrecognized.len(),
            "snapshot loaded"
        );
        snapshot
    }

    /// Write the demos, followed by any passthrough records, as pretty JSON.
    /// The bytes go to a sibling temp file first and are renamed over the
    /// snapshot, so readers see either the old or the new file.
    pub fn save(&self, demos: &[Demo], unrecognized: &[Value]) -> Result<(), ImportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ImportError::SnapshotDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut elements = Vec::with_capacity(demos.len() + unrecognized.len());
        for demo in demos {
            elements.push(serde_json::to_value(demo)?);
        }
        elements.extend(unrecognized.iter().cloned());
        let mut body = serde_json::to_string_pretty(&elements)?;
        body.push('\n');

        let tmp = self.temp_path();
        let write_err = |source| ImportError::SnapshotWrite {
            path: self.path.clone(),
            source,
        };
        let mut f = fs::File::create(&tmp).map_err(write_err)?;
        f.write_all(body.as_bytes()).map_err(write_err)?;
        f.sync_all().map_err(write_err)?;
        drop(f);
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(source));
        }
        debug!(path = %self.path.display(), count = elements.len(), "snapshot written");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "demos.json".into());
        name.push(format!(".tmp-{}", std::process::id()));
        self.path.with_file_name(name)
    }
}

// Records from other writers may lack `normalizedUrl`; derive it from `url`.
fn read_demo(element: &Value) -> Result<Demo, String> {
    let mut demo = Demo::deserialize(element).map_err(|e| e.to_string())?;
    if demo.id.trim().is_empty() {
        return Err("empty id".to_string());
    }
    if demo.normalized_url.trim().is_empty() {
        demo.normalized_url = normalize_url(&demo.url);
    }
    Ok(demo)
}
