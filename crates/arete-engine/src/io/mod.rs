use crate::parsing::{ParseResult, parse_cards};
use relative_path::RelativePathBuf;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid vault directory: {0}")]
    InvalidVaultDir(String),
}

/// A vault file that contains at least one card.
#[derive(Debug, Clone, Serialize)]
pub struct VaultEntry {
    pub path: RelativePathBuf,
    pub result: ParseResult,
}

/// Read and parse a single note
pub fn parse_file(path: &Path) -> Result<ParseResult, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(parse_cards(&content))
}

/// Scan for markdown files in the vault directory
pub fn scan_markdown_files(vault_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    validate_vault_dir(vault_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(vault_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Parse every markdown file under `vault_root`, keeping those with cards.
///
/// Files that cannot be read as UTF-8 text are logged and skipped.
pub fn scan_vault(vault_root: &Path) -> Result<Vec<VaultEntry>, IoError> {
    let mut entries = Vec::new();

    for file in scan_markdown_files(vault_root)? {
        let Ok(relative) = file.strip_prefix(vault_root) else {
            continue;
        };
        let Ok(path) = RelativePathBuf::from_path(relative) else {
            log::warn!("Skipping non-portable path: {}", file.display());
            continue;
        };
        let content = match fs::read_to_string(&file) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {e}", file.display());
                continue;
            }
        };

        let result = parse_cards(&content);
        if result.has_cards() {
            log::debug!("{path}: {} cards", result.ranges.len());
            entries.push(VaultEntry { path, result });
        }
    }

    Ok(entries)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            if is_hidden(&path) {
                continue;
            }
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

/// Dot-directories such as `.obsidian` or `.git` hold no notes.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

pub fn validate_vault_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidVaultDir(
            "vault directory not found".to_string(),
        ));
    }

    Ok(())
}
