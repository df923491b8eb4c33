//! brief-latex - LaTeX engine bridge for brief
//!
//! Runs `pdflatex` (or any compatible engine) on a rendered letter in a
//! scratch directory and turns the engine log into structured diagnostics.
//!
//! # Example
//!
//! ```no_run
//! use brief_core::Letter;
//! use brief_latex::{CompilerSettings, LatexCompiler};
//!
//! let compiler = LatexCompiler::new(CompilerSettings::default());
//! let mut letter = Letter::new()?;
//! letter.set_content("Hallo Welt")?;
//! letter.build_pdf(&compiler, "letter.pdf")?;
//! # Ok::<(), brief_core::LetterError>(())
//! ```

pub mod compiler;
pub mod error;
pub mod log;
pub mod settings;

pub use compiler::LatexCompiler;
pub use error::SettingsError;
pub use log::parse_log;
pub use settings::{CompilerSettings, Settings};
