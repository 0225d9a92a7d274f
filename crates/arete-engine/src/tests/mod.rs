use std::path::PathBuf;
use tempfile::TempDir;

pub fn create_test_vault() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Writes `content` to `name` under the vault, creating parent folders.
pub fn create_test_file(vault: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = vault.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
