//! Compiler settings
//!
//! Loaded from the `[compiler]` table of a TOML file:
//!
//! ```toml
//! [compiler]
//! program = "lualatex"
//! args = ["-synctex=0"]
//! search_paths = ["tex/"]
//! passes = 2
//! log_context = 3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};

/// Top-level settings structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// LaTeX compiler settings
    pub compiler: CompilerSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read and parse a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_toml_str(&text)?)
    }
}

/// How the LaTeX engine is invoked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CompilerSettings {
    /// Executable name or path
    pub program: String,
    /// Extra arguments placed before the job file
    pub args: Vec<String>,
    /// Directories added to `TEXINPUTS` (e.g. where `g-brief.cls` lives)
    pub search_paths: Vec<PathBuf>,
    /// Number of compiler runs
    pub passes: u32,
    /// Log lines kept per diagnostic, starting at the error line
    pub log_context: usize,
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            program: "pdflatex".to_string(),
            args: Vec::new(),
            search_paths: Vec::new(),
            passes: 1,
            log_context: 3,
        }
    }
}

impl CompilerSettings {
    /// Settings for another engine with every other value at its default
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }
}
