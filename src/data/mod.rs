//! The project document and its on-disk layout.
//!
//! A project lives in a directory conventionally named `<name>.mbird` holding a
//! single pretty-printed JSON file, [`TREE_FNAME`], with the whole node tree
//! inlined. Loading is strict about the extension; saving appends it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{MbirdNode, ROOT_ID};

/// Name of the tree document inside a project directory.
pub const TREE_FNAME: &str = "tree.json";

/// Extension every project directory carries.
pub const MBIRD_EXTENSION: &str = "mbird";

/// A project document: zero or one root node plus load/save against a directory.
///
/// Every mutating operation either installs a complete, validated tree or
/// fails and leaves the current root as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MbirdData {
    root: Option<MbirdNode>,
}

impl MbirdData {
    /// An empty document with no root.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: MbirdNode) -> Self {
        Self { root: Some(root) }
    }

    /// A fresh project: a single stale node with id `root`.
    pub fn create() -> Self {
        Self::with_root(MbirdNode::new(ROOT_ID))
    }

    /// Loads a document from a `.mbird` directory.
    pub fn open(dir_path: impl AsRef<Path>) -> Result<Self> {
        let mut data = Self::new();
        data.load(dir_path)?;
        Ok(data)
    }

    pub fn root(&self) -> Option<&MbirdNode> {
        self.root.as_ref()
    }

    /// Replaces the root with the tree stored in `dir_path`.
    pub fn load(&mut self, dir_path: impl AsRef<Path>) -> Result<()> {
        let dir_path = dir_path.as_ref();
        if !has_mbird_extension(dir_path) {
            return Err(Error::MissingExtension {
                path: dir_path.to_path_buf(),
            });
        }
        if !dir_path.exists() {
            return Err(Error::DirectoryNotFound {
                path: dir_path.to_path_buf(),
            });
        }
        if !dir_path.is_dir() {
            return Err(Error::NotADirectory {
                path: dir_path.to_path_buf(),
            });
        }

        let tree_file = dir_path.join(TREE_FNAME);
        if !tree_file.is_file() {
            return Err(Error::TreeFileNotFound { path: tree_file });
        }

        let json = fs::read_to_string(&tree_file)?;
        let root = MbirdNode::from_json(&json)?;
        tracing::debug!(
            "Loaded {} nodes from {}",
            root.node_count(),
            tree_file.display()
        );
        self.root = Some(root);
        Ok(())
    }

    /// Writes the tree to `dir_path`, appending `.mbird` when missing and
    /// creating any missing directories. Returns the directory written.
    pub fn save(&self, dir_path: impl AsRef<Path>) -> Result<PathBuf> {
        let root = self.root.as_ref().ok_or(Error::NoRoot)?;

        let dir_path = with_mbird_extension(dir_path.as_ref());
        fs::create_dir_all(&dir_path)?;

        let json = serde_json::to_string_pretty(root).map_err(std::io::Error::other)?;
        let tree_file = dir_path.join(TREE_FNAME);
        fs::write(&tree_file, json)?;
        tracing::debug!(
            "Saved {} nodes to {}",
            root.node_count(),
            tree_file.display()
        );
        Ok(dir_path)
    }

    /// Replaces the root with a tree parsed from untrusted JSON.
    pub fn replace(&mut self, value: serde_json::Value) -> Result<()> {
        let root = MbirdNode::from_value(value)?;
        self.root = Some(root);
        Ok(())
    }

    /// Marks every node of the tree as up to date.
    pub fn regenerate(&mut self) -> Result<()> {
        let root = self.root.as_mut().ok_or(Error::NoRoot)?;
        root.regenerate();
        Ok(())
    }
}

pub fn has_mbird_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == MBIRD_EXTENSION)
}

/// Returns `path` unchanged if it already ends in `.mbird`, otherwise with
/// `.mbird` appended to the final component (`a.b` becomes `a.b.mbird`).
/// Trailing separators are dropped first, so `proj/` becomes `proj.mbird`.
pub fn with_mbird_extension(path: &Path) -> PathBuf {
    let path: PathBuf = path.components().collect();
    if has_mbird_extension(&path) {
        return path;
    }
    let mut name = match path.file_name() {
        Some(name) => name.to_os_string(),
        None => return path.join(format!("project.{MBIRD_EXTENSION}")),
    };
    name.push(".");
    name.push(MBIRD_EXTENSION);
    path.with_file_name(name)
}
