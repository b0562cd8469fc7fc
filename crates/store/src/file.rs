//! JSON-file backed key-value store.
//!
//! All entries live in one JSON object. `set`/`delete` only touch the
//! in-memory map; `flush` rewrites the file through a sibling temp file and a
//! rename, so a failed flush leaves the previous file intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{PersistenceError, Result};
use crate::kv::KeyValueStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        log::debug!("opened store {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Open the store at `path`, setting an unparseable file aside.
    ///
    /// A file that is not a JSON object of strings is renamed to
    /// `<name>.corrupt` and the store starts empty, so the next flush writes a
    /// clean file. I/O errors are still returned.
    pub fn open_or_reset(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match Self::open(path.clone()) {
            Err(PersistenceError::Json(err)) => {
                let aside = sibling_path(&path, ".corrupt");
                log::warn!(
                    "store {} is unreadable ({}), moving it to {}",
                    path.display(),
                    err,
                    aside.display()
                );
                if let Err(err) = fs::rename(&path, &aside) {
                    log::warn!("could not move {} aside: {}", path.display(), err);
                }
                Ok(Self {
                    path,
                    entries: BTreeMap::new(),
                    dirty: false,
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are writes not yet flushed to disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// `path` with `suffix` appended to its file name.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.dirty = true;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = sibling_path(&self.path, ".tmp");
        let json = serde_json::to_vec_pretty(&self.entries)?;
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        self.dirty = false;
        Ok(())
    }
}
