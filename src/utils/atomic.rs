//! Atomic file rewrite
//!
//! Used by the anonymized export: the destination file must never be
//! observable in a half-written state, so content goes to a temp file
//! first and lands under the final name with a rename.
//!
//! # Pattern
//!
//! 1. Write to a temporary file (.tmp)
//! 2. Call sync_all() to flush to disk
//! 3. Rename temp file to final path (atomic on most filesystems)

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Atomically write a file using the provided writer function
///
/// The final file is either the previous version (crash before rename)
/// or the complete new version, never a partial state.
pub fn atomic_write_with<P, F>(path: P, write_fn: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(&temp_path)?;
    write_fn(&mut file)?;
    file.flush()?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}

/// Remove leftover .tmp files from interrupted writes; returns how many
/// were removed
pub fn cleanup_temp_files<P: AsRef<Path>>(dir: P) -> io::Result<usize> {
    let dir = dir.as_ref();
    let mut cleaned = 0;

    if !dir.exists() {
        return Ok(0);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|ext| ext == "tmp").unwrap_or(false) {
            fs::remove_file(&path)?;
            cleaned += 1;
        }
    }

    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_with() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.log");

        atomic_write_with(&path, |file| {
            writeln!(file, "line 1")?;
            writeln!(file, "line 2")
        })
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "line 1\nline 2\n");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out.log");

        atomic_write_with(&path, |file| writeln!(file, "content")).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_cleanup_temp_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.tmp"), "x").unwrap();
        fs::write(temp_dir.path().join("b.tmp"), "y").unwrap();
        fs::write(temp_dir.path().join("keep.log"), "z").unwrap();

        assert_eq!(cleanup_temp_files(temp_dir.path()).unwrap(), 2);
        assert!(temp_dir.path().join("keep.log").exists());
    }

    #[test]
    fn test_cleanup_missing_dir_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nowhere");
        assert_eq!(cleanup_temp_files(&missing).unwrap(), 0);
    }
}
