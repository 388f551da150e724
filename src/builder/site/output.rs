use std::fs;
use std::path::Path;
use log::{debug, info};

use crate::config::defaults::SPECIAL_FILES;
use crate::utils::error::QuireResult;

/// Remove previously generated files from the public directory.
///
/// Directories, hidden files and the special files (favicon, robots.txt
/// and friends) are left alone. Returns the number of removed files.
pub fn clear_public_dir(public_dir: &Path) -> QuireResult<usize> {
    info!("Cleaning public directory: {}", public_dir.display());
    let mut removed = 0;

    for entry in fs::read_dir(public_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || SPECIAL_FILES.contains(&name.as_ref()) {
            continue;
        }

        debug!("Removing {}", entry.path().display());
        fs::remove_file(entry.path())?;
        removed += 1;
    }

    Ok(removed)
}

/// Write a rendered page, and its homepage copy when `homepage` is set
pub fn write_page(public_dir: &Path, file_name: &str, bytes: &[u8], homepage: Option<&str>) -> QuireResult<()> {
    fs::write(public_dir.join(file_name), bytes)?;
    if let Some(index_file) = homepage {
        fs::write(public_dir.join(index_file), bytes)?;
    }
    Ok(())
}
