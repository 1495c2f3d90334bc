use super::backend::StorageBackend;
use crate::error::{MarqueeError, Result};
use crate::model::Scope;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem backend: one directory per scope, one `<key>.json` per key.
pub struct FsBackend {
    durable_root: PathBuf,
    ephemeral_root: PathBuf,
}

impl FsBackend {
    pub fn new(durable_root: PathBuf, ephemeral_root: PathBuf) -> Self {
        Self {
            durable_root,
            ephemeral_root,
        }
    }

    pub fn root(&self, scope: Scope) -> &Path {
        match scope {
            Scope::Durable => &self.durable_root,
            Scope::Ephemeral => &self.ephemeral_root,
        }
    }

    /// Path of the file holding `key`. Keys are restricted to
    /// `[A-Za-z0-9_-]` so they cannot escape the scope directory.
    pub fn key_path(&self, scope: Scope, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(MarqueeError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root(scope).join(format!("{}.json", key)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(MarqueeError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn read_raw(&self, scope: Scope, key: &str) -> Result<Option<String>> {
        let path = self.key_path(scope, key)?;
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MarqueeError::Io(e)),
        }
    }

    fn write_raw(&self, scope: Scope, key: &str, value: &str) -> Result<()> {
        let target = self.key_path(scope, key)?;
        let root = self.root(scope);
        self.ensure_dir(root)?;

        // Atomic Write
        let tmp = root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(MarqueeError::Io)?;
        fs::rename(&tmp, target).map_err(MarqueeError::Io)?;

        Ok(())
    }

    fn remove(&self, scope: Scope, key: &str) -> Result<()> {
        let path = self.key_path(scope, key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MarqueeError::Io(e)),
        }
    }

    fn clear_scope(&self, scope: Scope) -> Result<()> {
        let root = self.root(scope);
        if !root.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(root).map_err(MarqueeError::Io)? {
            let path = entry.map_err(MarqueeError::Io)?.path();
            let is_entry = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext == "json" || ext == "tmp");
            if is_entry {
                fs::remove_file(path).map_err(MarqueeError::Io)?;
            }
        }
        Ok(())
    }

    fn scope_available(&self, scope: Scope) -> bool {
        let root = self.root(scope);
        root.is_dir() || !root.exists()
    }
}
