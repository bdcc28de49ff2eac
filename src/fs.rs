//! File system access used by the pipeline

use std::io;
use std::path::{Path, PathBuf};

/// The file operations the pipeline depends on
pub trait FileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Regular files directly inside `dir`, sorted by path
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Read a whole file as text, replacing invalid UTF-8 instead of failing
    fn read_lossy(&self, path: &Path) -> io::Result<String>;

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    fn read_lossy(&self, path: &Path) -> io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        match std::fs::rename(from, to) {
            Ok(()) => Ok(()),
            // rename cannot cross file systems
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                std::fs::copy(from, to)?;
                std::fs::remove_file(from)
            }
            Err(e) => Err(e),
        }
    }
}
