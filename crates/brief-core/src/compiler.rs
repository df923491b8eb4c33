//! Compiler bridge trait
//!
//! The engine never runs LaTeX itself. A [`CompilerBridge`] receives the
//! complete rendered source and either returns the finished [`Artifact`] or
//! fails with [`LetterError::CompileFailure`](crate::LetterError::CompileFailure) listing every diagnostic.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Bytes of a successfully compiled letter (a PDF)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact to `path`, overwriting any existing file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Trait for external document compilers
///
/// Implementors must never return a partial artifact: a build either
/// produces the whole document or fails.
pub trait CompilerBridge {
    /// Human-readable name of this compiler
    fn name(&self) -> &str;

    /// Check if the compiler can be run at all
    ///
    /// For process-based compilers this looks up the executable.
    fn is_available(&self) -> bool {
        true
    }

    /// Compile complete LaTeX source
    ///
    /// # Errors
    /// - [`LetterError::CompileFailure`](crate::LetterError::CompileFailure) if the source was rejected
    /// - [`LetterError::Compiler`](crate::LetterError::Compiler) if the compiler could not be run
    fn compile(&self, source: &str) -> Result<Artifact>;
}

impl<T: CompilerBridge + ?Sized> CompilerBridge for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn compile(&self, source: &str) -> Result<Artifact> {
        (**self).compile(source)
    }
}

impl<T: CompilerBridge + ?Sized> CompilerBridge for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn compile(&self, source: &str) -> Result<Artifact> {
        (**self).compile(source)
    }
}
