//! brief CLI - Command-line interface library
//!
//! This library provides the CLI functionality for brief:
//! - Tex: write the LaTeX source of a letter
//! - Pdf: compile a letter with a LaTeX engine
//! - Check: list missing entries of a letter description
//!
//! # Binary Usage
//!
//! ```bash
//! # Write letter.tex
//! brief tex letter.toml
//!
//! # Compile with custom compiler settings
//! brief pdf letter.toml --output out/letter.pdf --config brief.toml
//!
//! # Check for missing entries
//! brief check letter.toml --format json
//! ```

pub mod app;
pub mod letter_file;

// Re-export main entry point and types
pub use app::{
    check_command, failure_report, load_letter, pdf_command, prepare_letter, tex_command,
};
pub use app::{run_cli, CheckReport, OutputFormat};
pub use letter_file::LetterFile;
