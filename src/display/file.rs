//! File-backed display surface.
//!
//! Each render replaces the whole file. Content is written to a sibling
//! `.tmp` file and renamed over the target, so readers never observe a
//! half-written rendering. The file is a diagnostic sink, not a durable
//! store: nothing is fsynced.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::surface::DisplaySurface;
use crate::error::RenderError;

/// A surface whose content lives in a file on disk.
///
/// Writes are blocking filesystem calls made on the thread that runs the
/// connection task. Keep the target on a local filesystem.
#[derive(Debug)]
pub struct FileSurface {
    path: PathBuf,
    // Serializes writers sharing the same temp path.
    write_lock: Mutex<()>,
}

impl FileSurface {
    /// Creates a surface writing to `path`. The file is created on the
    /// first render.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplaySurface for FileSurface {
    fn replace_content(&self, content: &str) -> Result<(), RenderError> {
        let _guard = self.write_lock.lock();
        let temp_path = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.write_all(b"\n")?;
        drop(file);

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_file_content() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("surface.json");
        let surface = FileSurface::new(&path);

        tokio_test::assert_ok!(surface.replace_content(r#"{"a":1}"#));
        tokio_test::assert_ok!(surface.replace_content(r#"{"a":2}"#));

        let Ok(written) = fs::read_to_string(&path) else {
            panic!("read failed");
        };
        assert_eq!(written, "{\"a\":2}\n");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn creates_missing_parent_directories() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        let path = dir.path().join("nested").join("deeper").join("out.json");
        let surface = FileSurface::new(&path);

        tokio_test::assert_ok!(surface.replace_content("null"));
        assert!(path.exists());
        assert_eq!(surface.path(), path.as_path());
    }

    #[test]
    fn unwritable_target_is_a_write_error() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir failed");
        };
        // A directory cannot be replaced by a file rename.
        let target = dir.path().join("occupied");
        let Ok(()) = fs::create_dir_all(target.join("child")) else {
            panic!("mkdir failed");
        };
        let surface = FileSurface::new(&target);
        assert!(matches!(
            surface.replace_content("x"),
            Err(RenderError::Write(_))
        ));
    }
}
