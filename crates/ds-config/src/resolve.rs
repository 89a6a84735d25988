//! Settings file location.
//!
//! DownShift reads a single sidecar file next to the service executable:
//! same directory, same base name, `.xml` extension. There is no search
//! chain and no environment override; the location is a pure function of
//! where the executable is installed.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of the sidecar settings file.
pub const SETTINGS_EXTENSION: &str = "xml";

/// Compute the sidecar settings path for an executable.
///
/// The executable's extension (if any) is replaced with
/// [`SETTINGS_EXTENSION`]; the directory is kept.
pub fn sidecar_path(executable: &Path) -> PathBuf {
    executable.with_extension(SETTINGS_EXTENSION)
}

/// Resolve the settings path for the running executable.
///
/// Fails only if the executable's own location cannot be determined.
pub fn settings_path() -> io::Result<PathBuf> {
    Ok(sidecar_path(&env::current_exe()?))
}
