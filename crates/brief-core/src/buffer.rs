//! Scratch buffer holding the most recently rendered letter
//!
//! Backed by an anonymous temporary file that the operating system removes
//! as soon as the handle is dropped.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::error::{LetterError, Result};
use crate::render::RenderedDocument;

/// Temporary buffer for rendered LaTeX source
#[derive(Debug)]
pub struct TexBuffer {
    file: Option<File>,
}

impl TexBuffer {
    /// Allocate an empty buffer
    pub fn open() -> Result<Self> {
        let file = tempfile::tempfile()?;
        debug!("Opened TeX buffer");
        Ok(Self { file: Some(file) })
    }

    /// Whether the buffer still holds its file
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Replace the buffer contents with `doc`
    ///
    /// The file is truncated first; nothing of a previous render survives.
    pub fn write(&mut self, doc: &RenderedDocument) -> Result<()> {
        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        file.write_all(doc.to_text().as_bytes())?;
        file.flush()?;
        debug!(lines = doc.len(), "Wrote rendered letter to buffer");
        Ok(())
    }

    /// Read the whole buffer from its start
    pub fn read_to_string(&mut self) -> Result<String> {
        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(0))?;
        let mut text = String::new();
        file.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Size of the buffered text in bytes
    pub fn len(&self) -> Result<u64> {
        match &self.file {
            Some(file) => Ok(file.metadata()?.len()),
            None => Err(LetterError::ClosedSession),
        }
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Release the file; calling this again does nothing
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            debug!("Released TeX buffer");
        }
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(LetterError::ClosedSession)
    }
}

impl Drop for TexBuffer {
    fn drop(&mut self) {
        self.close();
    }
}
