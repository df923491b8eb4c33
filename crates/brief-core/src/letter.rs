//! The letter session
//!
//! A [`Letter`] owns the field registry and the scratch buffer. It is open
//! from construction until [`Letter::close`] (or drop); afterwards every
//! operation fails with [`LetterError::ClosedSession`].
//!
//! # Example
//!
//! ```
//! use brief_core::{escape, Letter, Sender};
//!
//! let dir = tempfile::tempdir()?;
//! let mut letter = Letter::new()?;
//! letter.set_sender(Sender::new("John Doe", "Straße der Freiheit 1", "10115 Berlin"))?;
//! letter.set_subject(escape("Invoice #42"))?;
//! letter.set_content("Please find the invoice attached.")?;
//!
//! let path = letter.save_tex(dir.path().join("out/letter.tex"))?;
//! assert!(std::fs::read_to_string(path)?.ends_with("\\endinput"));
//!
//! letter.close();
//! assert!(letter.is_closed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::buffer::TexBuffer;
use crate::compiler::CompilerBridge;
use crate::content::{prepare_content, prepare_text};
use crate::error::{LetterError, Result};
use crate::field::{FieldRegistry, FieldValue};
use crate::fields;
use crate::render::{RenderedDocument, Renderer};

/// File name used by [`Letter::save_tex`] when no path is given
pub const DEFAULT_TEX_FILE: &str = "letter.tex";

/// File name used by [`Letter::build_pdf`] when no path is given
pub const DEFAULT_PDF_FILE: &str = "letter.pdf";

/// Sender address block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sender {
    pub name: String,
    pub street: String,
    /// Postcode and city, e.g. `10115 Berlin`
    pub city: String,
    pub country: String,
    /// Additional address line
    pub addition: String,
    /// Return address printed above the recipient window
    pub return_address: String,
}

impl Sender {
    pub fn new(name: impl Into<String>, street: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            street: street.into(),
            city: city.into(),
            ..Self::default()
        }
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    pub fn with_addition(mut self, addition: impl Into<String>) -> Self {
        self.addition = addition.into();
        self
    }

    pub fn with_return_address(mut self, return_address: impl Into<String>) -> Self {
        self.return_address = return_address.into();
        self
    }
}

/// Bank account shown in the footer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankDetails {
    pub bank: String,
    pub code: String,
    pub account: String,
}

/// Phone, fax and telex numbers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumbers {
    pub phone: String,
    pub fax: String,
    pub telex: String,
}

macro_rules! flag_accessors {
    ($($(#[$doc:meta])* $key:ident => $setter:ident, $getter:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $setter(&mut self, on: bool) -> Result<()> {
                self.set_value(fields::$key, FieldValue::Flag(on))
            }

            $(#[$doc])*
            pub fn $getter(&self) -> Result<bool> {
                self.registry()?.flag(fields::$key)
            }
        )*
    };
}

macro_rules! text_accessors {
    ($($(#[$doc:meta])* $key:ident => $setter:ident, $getter:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $setter(&mut self, value: impl Into<String>) -> Result<()> {
                self.set_value(fields::$key, FieldValue::Text(value.into()))
            }

            $(#[$doc])*
            pub fn $getter(&self) -> Result<&str> {
                self.registry()?.text(fields::$key)
            }
        )*
    };
}

macro_rules! lines_accessors {
    ($($(#[$doc:meta])* $key:ident => $setter:ident, $getter:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $setter(&mut self, lines: Vec<String>) -> Result<()> {
                self.set_value(fields::$key, FieldValue::Lines(lines))
            }

            $(#[$doc])*
            pub fn $getter(&self) -> Result<&[String]> {
                self.registry()?.lines(fields::$key)
            }
        )*
    };
}

/// A `g-brief` letter session
///
/// Values are stored exactly as given. Escape free text with
/// [`escape`](crate::escape) before setting it, or use the composite helpers
/// [`Letter::set_recipient_text`] and [`Letter::set_content`] which escape
/// every line themselves.
#[derive(Debug)]
pub struct Letter {
    registry: FieldRegistry,
    buffer: TexBuffer,
}

impl Letter {
    /// Open a letter with every field at its default
    pub fn new() -> Result<Self> {
        Self::with_registry(fields::g_brief())
    }

    /// Open a letter over a custom registry
    pub fn with_registry(registry: FieldRegistry) -> Result<Self> {
        Ok(Self {
            registry,
            buffer: TexBuffer::open()?,
        })
    }

    pub fn is_closed(&self) -> bool {
        !self.buffer.is_open()
    }

    /// End the session and release the buffer; safe to call repeatedly
    pub fn close(&mut self) {
        if !self.is_closed() {
            debug!("Closing letter session");
        }
        self.buffer.close();
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(LetterError::ClosedSession);
        }
        Ok(())
    }

    fn registry(&self) -> Result<&FieldRegistry> {
        self.ensure_open()?;
        Ok(&self.registry)
    }

    /// Set any field by key
    pub fn set_value(&mut self, key: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.ensure_open()?;
        self.registry.set_value(key, value)
    }

    /// Read any field by key
    pub fn value(&self, key: &str) -> Result<&FieldValue> {
        self.registry()?.value(key)
    }

    flag_accessors! {
        /// Hole punch mark
        LOCHERMARKE => set_hole_mark, hole_mark;
        /// Fold marks
        FALTMARKEN => set_fold_marks, fold_marks;
        /// Window envelope marks
        FENSTERMARKEN => set_window_marks, window_marks;
        /// Separator lines in header and footer
        TRENNLINIEN => set_separator_lines, separator_lines;
        /// Classic layout
        KLASSISCH => set_classic, classic;
        /// "Our reference" line
        UNSERZEICHEN => set_our_reference_line, our_reference_line;
    }

    text_accessors! {
        /// Recipient's reference
        IHRZEICHEN => set_your_reference, your_reference;
        /// Date of the recipient's letter
        IHRSCHREIBEN => set_your_letter, your_letter;
        /// Sender's reference
        MEINZEICHEN => set_my_reference, my_reference;
        NAME => set_name, name;
        STRASSE => set_street, street;
        /// Additional address line
        ZUSATZ => set_addition, addition;
        RETOURADRESSE => set_return_address, return_address;
        /// Postcode and city
        ORT => set_city, city;
        LAND => set_country, country;
        TELEFON => set_phone, phone;
        TELEFAX => set_fax, fax;
        TELEX => set_telex, telex;
        HTTP => set_homepage, homepage;
        EMAIL => set_email, email;
        BANK => set_bank_name, bank_name;
        /// Bank code
        BLZ => set_bank_code, bank_code;
        KONTO => set_account, account;
        /// Postal note above the recipient address
        POSTVERMERK => set_mail_note, mail_note;
        DATUM => set_date, date;
        BETREFF => set_subject, subject;
        ANREDE => set_salutation, salutation;
        /// Closing salutation
        GRUSS => set_closing, closing;
        UNTERSCHRIFT => set_signature, signature;
        /// Distribution list
        VERTEILER => set_distribution, distribution;
    }

    lines_accessors! {
        /// Recipient address lines, emitted verbatim inside `\Adresse{...}`
        ADRESSE => set_recipient, recipient;
        /// Enclosures, emitted verbatim inside `\Anlagen{...}`
        ANLAGEN => set_enclosures, enclosures;
        /// Letter body, emitted verbatim; must contain the document and
        /// `g-brief` environments
        TEXT => set_text, text;
    }

    /// Set the whole sender block
    pub fn set_sender(&mut self, sender: Sender) -> Result<()> {
        self.ensure_open()?;
        let Sender {
            name,
            street,
            city,
            country,
            addition,
            return_address,
        } = sender;
        self.set_name(name)?;
        self.set_street(street)?;
        self.set_city(city)?;
        self.set_country(country)?;
        self.set_addition(addition)?;
        self.set_return_address(return_address)
    }

    pub fn sender(&self) -> Result<Sender> {
        Ok(Sender {
            name: self.name()?.to_string(),
            street: self.street()?.to_string(),
            city: self.city()?.to_string(),
            country: self.country()?.to_string(),
            addition: self.addition()?.to_string(),
            return_address: self.return_address()?.to_string(),
        })
    }

    pub fn set_bank(&mut self, details: BankDetails) -> Result<()> {
        self.ensure_open()?;
        self.set_bank_name(details.bank)?;
        self.set_bank_code(details.code)?;
        self.set_account(details.account)
    }

    pub fn bank(&self) -> Result<BankDetails> {
        Ok(BankDetails {
            bank: self.bank_name()?.to_string(),
            code: self.bank_code()?.to_string(),
            account: self.account()?.to_string(),
        })
    }

    pub fn set_phone_numbers(&mut self, numbers: PhoneNumbers) -> Result<()> {
        self.ensure_open()?;
        self.set_phone(numbers.phone)?;
        self.set_fax(numbers.fax)?;
        self.set_telex(numbers.telex)
    }

    pub fn phone_numbers(&self) -> Result<PhoneNumbers> {
        Ok(PhoneNumbers {
            phone: self.phone()?.to_string(),
            fax: self.fax()?.to_string(),
            telex: self.telex()?.to_string(),
        })
    }

    /// Set both correspondence references
    pub fn set_references(&mut self, yours: impl Into<String>, mine: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        self.set_your_reference(yours)?;
        self.set_my_reference(mine)
    }

    /// `(yours, mine)`
    pub fn references(&self) -> Result<(String, String)> {
        Ok((
            self.your_reference()?.to_string(),
            self.my_reference()?.to_string(),
        ))
    }

    /// Set the recipient from raw multi-line text, escaping every line
    pub fn set_recipient_text(&mut self, raw: &str) -> Result<()> {
        self.set_recipient(prepare_text(raw))
    }

    /// Set the body from raw multi-line text
    ///
    /// Every line is escaped and ends in a forced line break; the result is
    /// wrapped in the document and `g-brief` environments.
    pub fn set_content(&mut self, raw: &str) -> Result<()> {
        self.set_text(prepare_content(raw))
    }

    /// Render the current fields and store the result in the buffer
    pub fn render(&mut self) -> Result<RenderedDocument> {
        self.ensure_open()?;
        let doc = Renderer::render(&self.registry);
        self.buffer.write(&doc)?;
        debug!(lines = doc.len(), "Rendered letter");
        Ok(doc)
    }

    /// Text of the last render, read back from the buffer
    pub fn rendered_text(&mut self) -> Result<String> {
        self.ensure_open()?;
        self.buffer.read_to_string()
    }

    /// Render and write the LaTeX source to `path`
    ///
    /// An empty path means [`DEFAULT_TEX_FILE`]. Missing parent directories
    /// are created and an existing file is overwritten.
    pub fn save_tex(&mut self, path: impl AsRef<Path>) -> Result<PathBuf> {
        self.render()?;
        let path = resolve_path(path.as_ref(), DEFAULT_TEX_FILE);
        let text = self.buffer.read_to_string()?;
        create_parent_dirs(&path)?;
        fs::write(&path, text)?;
        info!(path = %path.display(), "Saved LaTeX source");
        Ok(path)
    }

    /// Render, compile with `compiler` and write the PDF to `path`
    ///
    /// An empty path means [`DEFAULT_PDF_FILE`]. If the compiler rejects the
    /// source every diagnostic is logged and returned in
    /// [`LetterError::CompileFailure`], nothing is written and the session is
    /// closed. Other errors leave the session open.
    pub fn build_pdf<C>(&mut self, compiler: &C, path: impl AsRef<Path>) -> Result<PathBuf>
    where
        C: CompilerBridge + ?Sized,
    {
        self.render()?;
        let path = resolve_path(path.as_ref(), DEFAULT_PDF_FILE);
        let source = self.buffer.read_to_string()?;

        debug!(compiler = compiler.name(), "Compiling letter");

        let artifact = match compiler.compile(&source) {
            Ok(artifact) => artifact,
            Err(LetterError::CompileFailure(failure)) => {
                for diag in failure.diagnostics() {
                    debug!(
                        source = %diag.source,
                        line = ?diag.line,
                        context = diag.context_line().unwrap_or(""),
                        "{}",
                        diag.message
                    );
                }
                self.close();
                return Err(failure.into());
            }
            Err(e) => return Err(e),
        };

        create_parent_dirs(&path)?;
        artifact.save_to(&path)?;
        info!(path = %path.display(), bytes = artifact.len(), "Saved PDF");
        Ok(path)
    }
}

fn resolve_path(path: &Path, default: &str) -> PathBuf {
    if path.as_os_str().is_empty() {
        PathBuf::from(default)
    } else {
        path.to_path_buf()
    }
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Artifact;
    use crate::diagnostics::{CompileFailure, Diagnostic};

    struct FixedPdf;

    impl CompilerBridge for FixedPdf {
        fn name(&self) -> &str {
            "fixed"
        }

        fn compile(&self, _source: &str) -> Result<Artifact> {
            Ok(Artifact::new(b"%PDF-1.5 test".to_vec()))
        }
    }

    struct Rejecting;

    impl CompilerBridge for Rejecting {
        fn name(&self) -> &str {
            "rejecting"
        }

        fn compile(&self, _source: &str) -> Result<Artifact> {
            Err(CompileFailure::new(vec![
                Diagnostic::new("letter.tex", Some(3), "first"),
                Diagnostic::new("letter.tex", Some(9), "second"),
            ])
            .into())
        }
    }

    #[test]
    fn test_new_letter_is_open_with_defaults() {
        let letter = Letter::new().unwrap();
        assert!(!letter.is_closed());
        assert!(letter.hole_mark().unwrap());
        assert!(!letter.classic().unwrap());
        assert_eq!(letter.subject().unwrap(), "");
        assert!(letter.text().unwrap().is_empty());
    }

    #[test]
    fn test_accessors_pass_values_through() {
        let mut letter = Letter::new().unwrap();
        letter.set_subject("50% off").unwrap();
        letter.set_fold_marks(false).unwrap();
        letter
            .set_enclosures(vec!["CV".to_string(), "Zeugnis".to_string()])
            .unwrap();

        // No escaping on plain setters
        assert_eq!(letter.subject().unwrap(), "50% off");
        assert!(!letter.fold_marks().unwrap());
        assert_eq!(letter.enclosures().unwrap(), ["CV", "Zeugnis"]);
    }

    #[test]
    fn test_sender_roundtrip() {
        let mut letter = Letter::new().unwrap();
        let sender = Sender::new("John Doe", "Straße der Freiheit", "Berlin")
            .with_country("Germany")
            .with_return_address("J. Doe, Berlin");
        letter.set_sender(sender.clone()).unwrap();

        assert_eq!(letter.sender().unwrap(), sender);
        assert_eq!(letter.name().unwrap(), "John Doe");
        assert_eq!(letter.addition().unwrap(), "");
    }

    #[test]
    fn test_bank_phone_and_references() {
        let mut letter = Letter::new().unwrap();
        let bank = BankDetails {
            bank: "Sparkasse".into(),
            code: "100 500 00".into(),
            account: "1234567".into(),
        };
        let numbers = PhoneNumbers {
            phone: "030 123".into(),
            ..PhoneNumbers::default()
        };
        letter.set_bank(bank.clone()).unwrap();
        letter.set_phone_numbers(numbers.clone()).unwrap();
        letter.set_references("AZ 1", "JD/2").unwrap();

        assert_eq!(letter.bank().unwrap(), bank);
        assert_eq!(letter.phone_numbers().unwrap(), numbers);
        assert_eq!(
            letter.references().unwrap(),
            ("AZ 1".to_string(), "JD/2".to_string())
        );
    }

    #[test]
    fn test_composite_helpers_escape() {
        let mut letter = Letter::new().unwrap();
        letter.set_recipient_text("Firma A & B\nPostfach 1").unwrap();
        letter.set_content("Rabatt: 10%").unwrap();

        assert_eq!(
            letter.recipient().unwrap(),
            ["Firma A \\& B\\\\", "Postfach 1\\\\"]
        );
        assert!(letter.text().unwrap().contains(&"Rabatt: 10\\%\\\\".to_string()));
    }

    #[test]
    fn test_generic_access_errors() {
        let mut letter = Letter::new().unwrap();
        assert!(matches!(
            letter.set_value("unknown", "x"),
            Err(LetterError::UnknownField(_))
        ));
        assert!(matches!(
            letter.set_value(fields::BETREFF, vec!["x".to_string()]),
            Err(LetterError::TypeMismatch { .. })
        ));
        assert!(matches!(
            letter.value("unknown"),
            Err(LetterError::UnknownField(_))
        ));
    }

    #[test]
    fn test_render_refreshes_after_change() {
        let mut letter = Letter::new().unwrap();
        letter.set_subject("First").unwrap();
        letter.render().unwrap();
        letter.set_subject("Second").unwrap();
        let doc = letter.render().unwrap();

        let text = letter.rendered_text().unwrap();
        assert_eq!(text, doc.to_text());
        assert!(text.contains("\\Betreff{Second}"));
        assert!(!text.contains("First"));
    }

    #[test]
    fn test_build_pdf_writes_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let mut letter = Letter::new().unwrap();
        let path = letter
            .build_pdf(&FixedPdf, dir.path().join("nested/out.pdf"))
            .unwrap();
        assert_eq!(fs::read(path).unwrap(), b"%PDF-1.5 test");
    }

    #[test]
    fn test_build_pdf_reports_all_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.pdf");
        let mut letter = Letter::new().unwrap();

        let err = letter.build_pdf(&Rejecting, &target).unwrap_err();
        assert_eq!(err.diagnostics().len(), 2);
        assert!(!target.exists());
        assert!(letter.is_closed());

        letter.close();
        assert!(letter.is_closed());
        assert!(matches!(letter.subject(), Err(LetterError::ClosedSession)));
    }

    #[test]
    fn test_closed_session_rejects_everything() {
        let mut letter = Letter::new().unwrap();
        letter.close();
        letter.close();

        assert!(matches!(
            letter.set_subject("x"),
            Err(LetterError::ClosedSession)
        ));
        assert!(matches!(
            letter.set_value(fields::NAME, "x"),
            Err(LetterError::ClosedSession)
        ));
        assert!(matches!(letter.subject(), Err(LetterError::ClosedSession)));
        assert!(matches!(letter.render(), Err(LetterError::ClosedSession)));
        assert!(matches!(
            letter.save_tex("unused.tex"),
            Err(LetterError::ClosedSession)
        ));
        assert!(matches!(
            letter.build_pdf(&FixedPdf, "unused.pdf"),
            Err(LetterError::ClosedSession)
        ));
        assert!(matches!(
            letter.set_sender(Sender::default()),
            Err(LetterError::ClosedSession)
        ));
    }

    #[test]
    fn test_resolve_path_default() {
        assert_eq!(resolve_path(Path::new(""), "letter.tex"), PathBuf::from("letter.tex"));
        assert_eq!(resolve_path(Path::new("a/b.tex"), "letter.tex"), PathBuf::from("a/b.tex"));
    }
}
