//! brief-core - LaTeX letters from named fields
//!
//! Core library for brief: assembles a `g-brief` LaTeX letter from an ordered
//! set of fields and hands the result to an external compiler.
//!
//! # Architecture
//!
//! 1. **FieldRegistry** - ordered fields with fixed shapes ([`fields::g_brief`])
//! 2. **Renderer** - turns the registry into LaTeX source lines
//! 3. **TexBuffer** - temporary file holding the latest render
//! 4. **CompilerBridge** - external compiler producing the PDF
//! 5. **Letter** - session tying the above together
//!
//! # Example
//!
//! ```
//! use brief_core::{escape, fields, FieldRegistry, Renderer};
//!
//! let mut registry = FieldRegistry::default();
//! registry.set_value(fields::BETREFF, escape("Offer & terms"))?;
//!
//! let doc = Renderer::render(&registry);
//! assert!(doc.lines().contains(&"\\Betreff{Offer \\& terms}".to_string()));
//! assert_eq!(doc.lines().last().map(String::as_str), Some("\\endinput"));
//! # Ok::<(), brief_core::LetterError>(())
//! ```

pub mod buffer;
pub mod compiler;
pub mod content;
pub mod diagnostics;
mod error;
pub mod escape;
pub mod field;
pub mod fields;
pub mod letter;
pub mod render;

// Re-export main types and functions
pub use buffer::TexBuffer;
pub use compiler::{Artifact, CompilerBridge};
pub use diagnostics::{CompileFailure, Diagnostic};
pub use error::{LetterError, Result};
pub use escape::escape;
pub use field::{Field, FieldRegistry, FieldRole, FieldShape, FieldValue};
pub use letter::{BankDetails, Letter, PhoneNumbers, Sender, DEFAULT_PDF_FILE, DEFAULT_TEX_FILE};
pub use render::{RenderedDocument, Renderer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
