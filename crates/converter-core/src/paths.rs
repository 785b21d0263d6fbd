use crate::error::{Result, StoreError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const APP_QUALIFIER: &str = "com";
pub const APP_ORG: &str = "bangla";
pub const APP_NAME: &str = "converter";

pub const CONFIG_FILE: &str = "config.json";

pub fn data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .ok_or_else(|| StoreError::Config("cannot determine data directory".into()))?;
    Ok(dirs.data_dir().to_path_buf())
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Database file location. An explicit override (`--db-path`) wins over the
/// configured file name.
pub fn database_path(
    data_dir: &Path,
    database_file: &str,
    override_path: Option<&Path>,
) -> PathBuf {
    match override_path {
        Some(path) if !path.as_os_str().is_empty() => path.to_path_buf(),
        _ => data_dir.join(database_file),
    }
}
