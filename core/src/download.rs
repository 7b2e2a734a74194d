//! Client-side delivery of a generated presentation.

use slidegenius_common::GeneratedFile;
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::page::Page;

/// Stage the file, trigger one download, and release the transient reference.
///
/// The release runs whether or not the trigger succeeded.
pub fn deliver<P: Page + ?Sized>(page: &mut P, file: GeneratedFile) -> io::Result<()> {
    let file_name = file.file_name.clone();
    let staged = page.stage_download(file)?;
    let triggered = page.trigger_download(&staged, &file_name);
    page.release_download(staged);
    triggered
}

/// Saves downloads into a directory, staging the bytes in a temp file first.
#[derive(Debug, Clone)]
pub struct FsDownloads {
    out_dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl FsDownloads {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            saved: Vec::new(),
        }
    }

    /// Paths written by completed downloads, oldest first.
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }

    pub fn stage(&self, file: &GeneratedFile) -> io::Result<NamedTempFile> {
        std::fs::create_dir_all(&self.out_dir)?;
        let mut staged = tempfile::Builder::new()
            .prefix(".slidegenius-")
            .suffix(".part")
            .tempfile_in(&self.out_dir)?;
        staged.write_all(&file.bytes)?;
        staged.flush()?;
        Ok(staged)
    }

    pub fn trigger(&mut self, staged: &NamedTempFile, file_name: &str) -> io::Result<PathBuf> {
        let target = self.out_dir.join(file_name);
        std::fs::copy(staged.path(), &target)?;
        tracing::info!(path = %target.display(), "download saved");
        self.saved.push(target.clone());
        Ok(target)
    }

    pub fn release(&self, staged: NamedTempFile) {
        let path = staged.path().to_path_buf();
        if let Err(err) = staged.close() {
            tracing::warn!(path = %path.display(), "failed to remove staged download: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidegenius_common::OUTPUT_FILE_NAME;

    #[test]
    fn test_fs_download_leaves_only_output() {
        let tmp = tempfile::tempdir().unwrap();
        let mut downloads = FsDownloads::new(tmp.path());
        let file = GeneratedFile::new(vec![0x50, 0x4b, 1, 2]);

        let staged = downloads.stage(&file).unwrap();
        let staged_path = staged.path().to_path_buf();
        assert!(staged_path.exists());

        let target = downloads.trigger(&staged, OUTPUT_FILE_NAME).unwrap();
        downloads.release(staged);

        assert!(!staged_path.exists());
        assert_eq!(std::fs::read(&target).unwrap(), vec![0x50, 0x4b, 1, 2]);
        assert_eq!(downloads.saved(), &[tmp.path().join(OUTPUT_FILE_NAME)]);

        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_stage_creates_missing_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("out/decks");
        let downloads = FsDownloads::new(&nested);
        let staged = downloads.stage(&GeneratedFile::new(vec![1])).unwrap();
        assert!(staged.path().starts_with(&nested));
        downloads.release(staged);
    }
}
