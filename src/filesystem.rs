//! Directory browsing for the project picker.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::home_dir;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
}

/// The sub-directories of one directory, plus its parent for navigating up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub current: String,
    /// `None` at the filesystem root.
    pub parent: Option<String>,
    pub directories: Vec<DirectoryEntry>,
}

/// Expands a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}

/// Lists the visible sub-directories of `path`, sorted by name.
///
/// Files and dot-directories are skipped. A directory that cannot be read
/// lists as empty rather than failing.
pub fn browse(path: &str) -> Result<DirectoryListing> {
    let expanded = expand_home(path);
    if !expanded.exists() {
        return Err(Error::DirectoryNotFound { path: expanded });
    }
    if !expanded.is_dir() {
        return Err(Error::NotADirectory { path: expanded });
    }
    let dir = expanded.canonicalize()?;

    let directories = match list_directories(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Skipping unreadable directory {}: {}", dir.display(), e);
            Vec::new()
        }
    };

    Ok(DirectoryListing {
        current: dir.to_string_lossy().into_owned(),
        parent: dir.parent().map(|p| p.to_string_lossy().into_owned()),
        directories,
    })
}

fn list_directories(dir: &Path) -> std::io::Result<Vec<DirectoryEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !entry.path().is_dir() {
            continue;
        }
        entries.push(DirectoryEntry {
            name,
            path: entry.path().to_string_lossy().into_owned(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
