use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::{Builder, NamedTempFile};

/// A uniquely named temporary file that becomes `dest` on success.
///
/// The scratch file lives in the same directory as the destination so the
/// final rename never crosses a filesystem. If the handle is dropped without
/// [`ScratchFile::persist`] being called, the temp file is removed, so a
/// failed write never leaves a partial output behind.
pub struct ScratchFile {
    file: NamedTempFile,
    dest: PathBuf,
}

impl ScratchFile {
    /// Create a scratch file next to `dest`.
    pub fn for_output<P: AsRef<Path>>(dest: P) -> Result<Self> {
        let dest = dest.as_ref().to_path_buf();
        let dir = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = Builder::new()
            .prefix(".pdftoolbox-")
            .suffix(".tmp")
            .tempfile_in(&dir)
            .with_context(|| format!("Failed to create scratch file in {}", dir.display()))?;
        Ok(ScratchFile { file, dest })
    }

    /// Path to write the artifact to.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Move the scratch file into place as the destination.
    pub fn persist(self) -> Result<()> {
        let dest = self.dest;
        self.file
            .persist(&dest)
            .with_context(|| format!("Failed to move output into place: {}", dest.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_persist_moves_into_place() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");

        let mut scratch = ScratchFile::for_output(&dest).unwrap();
        scratch.file.write_all(b"%PDF-1.5").unwrap();
        let tmp_path = scratch.path().to_path_buf();
        assert!(tmp_path.exists());

        scratch.persist().unwrap();
        assert!(!tmp_path.exists());
        assert_eq!(std::fs::read(&dest).unwrap(), b"%PDF-1.5");
    }

    #[test]
    fn test_drop_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");

        let tmp_path = {
            let scratch = ScratchFile::for_output(&dest).unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!tmp_path.exists());
        assert!(!dest.exists());
    }

    #[test]
    fn test_scratch_lives_next_to_destination() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        let scratch = ScratchFile::for_output(&dest).unwrap();
        assert_eq!(scratch.path().parent(), Some(dir.path()));
    }

    #[test]
    fn test_persist_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out.pdf");
        std::fs::write(&dest, b"old").unwrap();

        let mut scratch = ScratchFile::for_output(&dest).unwrap();
        scratch.file.write_all(b"new").unwrap();
        scratch.persist().unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }
}
