use crate::store::fs_backend::FsBackend;
use crate::store::AppStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary directory holding a durable and an ephemeral storage root.
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn durable_root(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn ephemeral_root(&self) -> PathBuf {
        self.root.join("session")
    }

    /// A fresh store over the same directories; opening it twice models a
    /// page reload.
    pub fn store(&self) -> AppStore<FsBackend> {
        AppStore::with_backend(FsBackend::new(self.durable_root(), self.ephemeral_root()))
    }
}
