//! The currently open project.
//!
//! A [`ProjectSession`] holds at most one document together with the path it
//! was created or loaded from and the time it was last saved. The HTTP layer
//! keeps one behind a mutex in its router state; nothing here is global.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::data::MbirdData;
use crate::error::{Error, Result};
use crate::models::MbirdNode;

#[derive(Debug, Default)]
pub struct ProjectSession {
    data: Option<MbirdData>,
    path: Option<PathBuf>,
    last_saved: Option<DateTime<Utc>>,
}

impl ProjectSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new project at `path`, discarding whatever was open.
    ///
    /// Nothing is written until [`ProjectSession::save`].
    pub fn create(&mut self, path: impl Into<PathBuf>) -> Result<&MbirdNode> {
        let path = path.into();
        tracing::info!("Creating project at {}", path.display());
        self.path = Some(path);
        self.data = Some(MbirdData::create());
        self.tree()
    }

    /// Opens the project stored at `path`. On failure the open project is kept.
    pub fn load(&mut self, path: impl Into<PathBuf>) -> Result<&MbirdNode> {
        let path = path.into();
        let data = MbirdData::open(&path)?;
        tracing::info!("Loaded project from {}", path.display());
        self.path = Some(path);
        self.data = Some(data);
        self.tree()
    }

    /// The root of the open project.
    pub fn tree(&self) -> Result<&MbirdNode> {
        self.data
            .as_ref()
            .and_then(MbirdData::root)
            .ok_or(Error::NoProject)
    }

    /// Replaces the whole tree. Works without an open project, in which case
    /// a document without a path is installed.
    pub fn replace(&mut self, value: serde_json::Value) -> Result<&MbirdNode> {
        match &mut self.data {
            Some(data) => data.replace(value)?,
            None => {
                let root = MbirdNode::from_value(value)?;
                self.data = Some(MbirdData::with_root(root));
            }
        }
        self.tree()
    }

    /// Marks every node of the open project as up to date.
    pub fn regenerate(&mut self) -> Result<&MbirdNode> {
        let data = self
            .data
            .as_mut()
            .filter(|data| data.root().is_some())
            .ok_or(Error::NoProject)?;
        data.regenerate()?;
        tracing::info!("Regenerated project tree");
        self.tree()
    }

    /// Writes the open project to its path and records the save time.
    pub fn save(&mut self) -> Result<DateTime<Utc>> {
        let data = self
            .data
            .as_ref()
            .filter(|data| data.root().is_some())
            .ok_or(Error::NoProject)?;
        let path = self.path.as_ref().ok_or(Error::NoProjectPath)?;

        let written = data.save(path)?;
        let now = Utc::now();
        self.last_saved = Some(now);
        tracing::info!("Saved project to {}", written.display());
        Ok(now)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }
}
