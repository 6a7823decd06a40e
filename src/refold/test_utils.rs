use crate::capture::Buffer;
use crate::model::FoldRange;
use crate::store::fs::FsBackend;
use crate::store::STORE_DIR_NAME;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scripted editor buffer.
///
/// `folds` is what the buffer reports as folded (duplicates allowed, as a
/// real fold marker layer can hold them). `fold()` calls are recorded and
/// also become folded regions, ignoring ones already present.
#[derive(Debug, Clone, Default)]
pub struct FakeBuffer {
    path: Option<String>,
    folds: Vec<FoldRange>,
    fold_calls: Vec<FoldRange>,
}

impl FakeBuffer {
    pub fn new(path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            ..Self::default()
        }
    }

    pub fn untitled() -> Self {
        Self::default()
    }

    pub fn with_folds(mut self, folds: Vec<FoldRange>) -> Self {
        self.folds = folds;
        self
    }

    pub fn set_path(&mut self, path: &str) {
        self.path = Some(path.to_string());
    }

    pub fn set_folds(&mut self, folds: Vec<FoldRange>) {
        self.folds = folds;
    }

    pub fn fold_calls(&self) -> &[FoldRange] {
        &self.fold_calls
    }
}

impl Buffer for FakeBuffer {
    fn file_identity(&self) -> Option<String> {
        self.path.clone()
    }

    fn folded_ranges(&self) -> Vec<FoldRange> {
        self.folds.clone()
    }

    fn fold(&mut self, range: &FoldRange) {
        self.fold_calls.push(*range);
        if !self.folds.contains(range) {
            self.folds.push(*range);
        }
    }
}

/// A temporary project with an (optionally created) `.js-folds/` directory.
pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub project_root: PathBuf,
    pub store_dir: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let env = Self::without_store();
        std::fs::create_dir(&env.store_dir).expect("failed to create store dir");
        env
    }

    pub fn without_store() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let project_root = temp_dir.path().to_path_buf();
        let store_dir = project_root.join(STORE_DIR_NAME);
        Self {
            _temp_dir: temp_dir,
            project_root,
            store_dir,
        }
    }

    pub fn backend(&self) -> FsBackend {
        FsBackend::new(self.store_dir.clone())
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.store_dir.join(name), content).expect("failed to seed document");
    }

    pub fn read(&self, name: &str) -> Option<String> {
        std::fs::read_to_string(self.store_dir.join(name)).ok()
    }
}
