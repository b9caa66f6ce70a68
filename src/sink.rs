use crate::error::WalkError;
use crate::results::ChapterRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only chapter file
///
/// No handle is kept between records: every append opens the file, writes the
/// whole rendered record in one call and closes it again.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one chapter to the end of the file, creating it if needed
    pub fn append(&self, record: &ChapterRecord) -> Result<(), WalkError> {
        let rendered = record.render();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        file.write_all(rendered.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|source| self.io_error(source))?;

        ::log::trace!(
            "Appended {} bytes for {:?} to {}",
            rendered.len(),
            record.title,
            self.path.display()
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> WalkError {
        WalkError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
