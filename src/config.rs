//! Console configuration.
//!
//! Server settings come from environment variables:
//! - `MBIRD_HOST` - Bind address (default: `127.0.0.1`)
//! - `MBIRD_PORT` - HTTP port (default: `8000`)
//! - `MBIRD_CORS_ORIGINS` - Allowed origins, comma-separated (default: `http://localhost:5173`)
//! - `MBIRD_CONFIG_DIR` - Where console state is kept (default: `~/.mbird`)
//!
//! The config directory holds a `last_directory` file remembering where the
//! user last opened a project.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
/// Vite dev server.
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const LAST_DIRECTORY_FNAME: &str = "last_directory";

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub config_dir: PathBuf,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let host = std::env::var("MBIRD_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = std::env::var("MBIRD_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let cors_origins = std::env::var("MBIRD_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let config_dir = std::env::var("MBIRD_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home_dir().join(".mbird"));

        Self {
            host,
            port,
            cors_origins,
            config_dir,
        }
    }

    /// Default settings with console state kept in `config_dir` (for testing).
    pub fn with_config_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            config_dir: config_dir.into(),
        }
    }

    fn last_directory_file(&self) -> PathBuf {
        self.config_dir.join(LAST_DIRECTORY_FNAME)
    }

    /// The last used directory, or the home directory if none was saved.
    pub fn last_directory(&self) -> Result<PathBuf> {
        let file = self.last_directory_file();
        if !file.exists() {
            return Ok(home_dir());
        }
        let saved = fs::read_to_string(file)?;
        Ok(PathBuf::from(saved.trim()))
    }

    pub fn save_last_directory(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::write(
            self.last_directory_file(),
            path.as_ref().to_string_lossy().as_bytes(),
        )?;
        Ok(())
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// The user's home directory, falling back to the filesystem root.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}
