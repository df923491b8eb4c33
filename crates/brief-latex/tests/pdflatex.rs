//! End-to-end tests against an installed LaTeX engine
//!
//! Ignored by default; run with `cargo test -- --ignored` on a machine with
//! `pdflatex` and the `g-brief` class installed.

use brief_core::{CompilerBridge, Letter, LetterError, Sender};
use brief_latex::{CompilerSettings, LatexCompiler};
use tempfile::TempDir;

fn compiler() -> Option<LatexCompiler> {
    let compiler = LatexCompiler::new(CompilerSettings::default());
    compiler.is_available().then_some(compiler)
}

#[test]
#[ignore]
fn test_build_letter_pdf() {
    let Some(compiler) = compiler() else { return };
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("letter.pdf");

    let mut letter = Letter::new().unwrap();
    letter
        .set_sender(Sender::new("John Doe", "Musterweg 1", "10115 Berlin"))
        .unwrap();
    letter.set_subject("Test").unwrap();
    letter.set_content("Text bla blub.").unwrap();

    letter.build_pdf(&compiler, &target).unwrap();
    assert!(std::fs::read(&target).unwrap().starts_with(b"%PDF"));
}

#[test]
#[ignore]
fn test_missing_document_reports_log_errors() {
    let Some(compiler) = compiler() else { return };
    let temp_dir = TempDir::new().unwrap();

    let mut letter = Letter::new().unwrap();
    letter
        .set_text(vec!["\n".to_string(), "Text bla blub.".to_string()])
        .unwrap();

    let err = letter
        .build_pdf(&compiler, temp_dir.path().join("letter.pdf"))
        .unwrap_err();
    assert!(matches!(err, LetterError::CompileFailure(_)));
    let diags = err.diagnostics();
    assert!(!diags.is_empty());
    assert!(diags[0].source.ends_with("letter.tex"));
    assert!(diags[0].line.is_some());
}
