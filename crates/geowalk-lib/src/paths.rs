use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the walking network document.
pub const NETWORK_FILENAME: &str = "network.json";

/// Default filename for the saved locations document.
pub const LOCATIONS_FILENAME: &str = "locations.json";

/// Environment variable overriding the network path.
pub const NETWORK_ENV: &str = "GEOWALK_NETWORK";

/// Environment variable overriding the locations path.
pub const LOCATIONS_ENV: &str = "GEOWALK_LOCATIONS";

/// Platform data directory for geowalk files.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "geowalk", "geowalk").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve the network document location.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `GEOWALK_NETWORK` environment variable.
/// 3. `network.json` in the platform data directory.
///
/// A path without an extension is treated as a directory holding the default
/// filename.
pub fn resolve_network_path(target: Option<&Path>) -> Result<PathBuf> {
    resolve_data_path(target, env::var_os(NETWORK_ENV), NETWORK_FILENAME)
}

/// Resolve the saved-locations document location; same order as
/// [`resolve_network_path`] with `GEOWALK_LOCATIONS`.
pub fn resolve_locations_path(target: Option<&Path>) -> Result<PathBuf> {
    resolve_data_path(target, env::var_os(LOCATIONS_ENV), LOCATIONS_FILENAME)
}

fn resolve_data_path(
    target: Option<&Path>,
    env_value: Option<OsString>,
    filename: &str,
) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(canonical_file_path(explicit, filename));
    }

    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        let resolved = canonical_file_path(Path::new(&value), filename);
        debug!(path = %resolved.display(), "using data path from environment");
        return Ok(resolved);
    }

    Ok(default_data_dir()?.join(filename))
}

fn canonical_file_path(path: &Path, filename: &str) -> PathBuf {
    if path.extension().is_some() {
        return path.to_path_buf();
    }

    path.join(filename)
}
