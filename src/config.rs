//! Runtime configuration
//!
//! Everything comes from the environment:
//! - `BODYCALC_DATABASE_PATH`: SQLite file holding saved form fields
//! - `RUST_LOG`: log filter (logs go to stderr)

use std::path::{Path, PathBuf};

pub const DATABASE_PATH_ENV: &str = "BODYCALC_DATABASE_PATH";

/// Get the database path from environment or use default
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));
            default_database_path(&exe_dir)
        })
}

/// `<project>/data/bodycalc.db`, stepping out of `target/{debug,release}`
pub fn default_database_path(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("bodycalc.db");
    path
}
