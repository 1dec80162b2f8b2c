use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use directories::ProjectDirs;
use eyre::Result;
use serde::Serialize;

const PREFS_FILE_NAME: &str = "cubetrainer";
const PREFS_FILE_EXTENSION: &str = "yaml";

static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("", "", "Cube Trainer"));

#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefsError {
    #[error("unable to get preferences file path")]
    NoPreferencesPath,
}

/// Returns the platform-specific path of the user preferences file.
pub fn prefs_file_path() -> Result<PathBuf, PrefsError> {
    let mut p = PROJECT_DIRS
        .as_ref()
        .ok_or(PrefsError::NoPreferencesPath)?
        .config_dir()
        .to_owned();
    p.push(format!("{PREFS_FILE_NAME}.{PREFS_FILE_EXTENSION}"));
    Ok(p)
}

pub(crate) fn save(path: &Path, prefs_data: &impl Serialize) -> Result<()> {
    if let Some(p) = path.parent() {
        std::fs::create_dir_all(p)?;
    }
    serde_norway::to_writer(std::fs::File::create(path)?, prefs_data)?;
    Ok(())
}
