use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::BuildError;
use crate::logger;

/// Working directory searched for a configuration file.
pub const WORKING_DIR: &str = ".nova";
/// Configuration file name inside the working directory.
pub const CONFIG_FILE: &str = "nc.json";

/// Looks for `.nova/nc.json` under the current directory. Absence is not
/// an error; the compiler runs with defaults (zero projects).
pub fn find_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let working = cwd.join(WORKING_DIR);
    if !working.exists() {
        logger::warn(format!(
            "working directory {} does not exist",
            working.display()
        ));
        return None;
    }
    logger::info(format!("found working directory: {}", working.display()));

    let config = working.join(CONFIG_FILE);
    if config.exists() {
        logger::info(format!("loading config: {}", config.display()));
        Some(config)
    } else {
        logger::warn(format!("no {CONFIG_FILE} found in working directory"));
        None
    }
}

/// A parsed configuration document. The project loader only performs
/// key/value lookup against `root`; it does not own document parsing.
#[derive(Debug)]
pub struct ConfigDoc {
    pub path: PathBuf,
    pub root: Value,
}

impl ConfigDoc {
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let text = fs::read_to_string(path).map_err(|source| BuildError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let root = serde_json::from_str(&text)?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Directory that relative paths in the document resolve against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}
