//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brief_core::{
    CompileFailure, CompilerBridge, Letter, LetterError, DEFAULT_PDF_FILE, DEFAULT_TEX_FILE,
};
use brief_latex::{LatexCompiler, Settings};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};

use crate::letter_file::LetterFile;

/// Output format for check results
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "brief")]
#[command(author, version, about = "Business letters from plain TOML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the LaTeX source of a letter
    Tex {
        /// Letter description (TOML)
        input: PathBuf,

        /// Output .tex file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compile a letter to PDF
    Pdf {
        /// Letter description (TOML)
        input: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Compiler settings file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Format of compile errors (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Check a letter description for missing entries
    Check {
        /// Letter description (TOML)
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tex { input, output } => {
            let path = tex_command(&input, output.as_deref())?;
            println!("{} created", path.display());
        }
        Commands::Pdf {
            input,
            output,
            config,
            format,
        } => {
            pdf_command(&input, output.as_deref(), config.as_deref(), format)?;
        }
        Commands::Check { input, format } => {
            check_command(&input, format)?;
        }
    }

    Ok(())
}

/// Read a letter description
pub fn load_letter(input: &Path) -> Result<LetterFile> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    let text = fs::read_to_string(input)
        .with_context(|| format!("Failed to read letter: {}", input.display()))?;
    LetterFile::from_toml_str(&text)
        .with_context(|| format!("Failed to parse letter: {}", input.display()))
}

/// Build a letter session from a description, refusing incomplete letters
pub fn prepare_letter(file: &LetterFile, today: NaiveDate) -> Result<Letter> {
    let missing = file.missing_fields();
    if !missing.is_empty() {
        anyhow::bail!("Missing fields: {}", missing.join(", "));
    }

    let mut letter = Letter::new().context("Failed to open letter session")?;
    file.apply(&mut letter, today)
        .context("Failed to fill in letter fields")?;
    Ok(letter)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Execute the tex command
pub fn tex_command(input: &Path, output: Option<&Path>) -> Result<PathBuf> {
    let file = load_letter(input)?;
    let mut letter = prepare_letter(&file, today())?;

    let target = output.unwrap_or(Path::new(DEFAULT_TEX_FILE));
    let path = letter
        .save_tex(target)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    letter.close();
    Ok(path)
}

/// Render the diagnostics of a failed build
pub fn failure_report(failure: &CompileFailure, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(failure.diagnostics())
            .context("Failed to serialize diagnostics to JSON"),
        OutputFormat::Text => Ok(failure.to_string()),
    }
}

/// Execute the pdf command
///
/// Compile errors are reported in `format` (JSON on stdout, text on
/// stderr) and end the process with exit code 1.
pub fn pdf_command(
    input: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let settings = match config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let compiler = LatexCompiler::new(settings.compiler);
    if !compiler.is_available() {
        warn!("{} not found in PATH", compiler.name());
    }

    let file = load_letter(input)?;
    let mut letter = prepare_letter(&file, today())?;
    let target = output.unwrap_or(Path::new(DEFAULT_PDF_FILE));

    match letter.build_pdf(&compiler, target) {
        Ok(path) => {
            letter.close();
            info!("Built {}", path.display());
            println!("{} created", path.display());
            Ok(())
        }
        Err(LetterError::CompileFailure(failure)) => {
            let report = failure_report(&failure, format)?;
            match format {
                OutputFormat::Json => println!("{}", report),
                OutputFormat::Text => eprintln!("{}", report),
            }
            eprintln!("Building PDF failed!");
            std::process::exit(1);
        }
        Err(e) => Err(e).with_context(|| format!("Failed to build {}", target.display())),
    }
}

/// Result of checking a letter description
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub file: String,
    pub missing: Vec<&'static str>,
}

impl CheckReport {
    pub fn new(input: &Path, file: &LetterFile) -> Self {
        Self {
            file: input.display().to_string(),
            missing: file.missing_fields(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Execute the check command
pub fn check_command(input: &Path, format: OutputFormat) -> Result<()> {
    let file = load_letter(input)?;
    let report = CheckReport::new(input, &file);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize check report to JSON")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if report.is_complete() {
                println!("✓ No missing fields in {}", input.display());
            } else {
                println!("Missing fields:");
                for key in &report.missing {
                    println!("  {}", key);
                }
            }
        }
    }

    if !report.is_complete() {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brief_core::Diagnostic;

    #[test]
    fn test_cli_parse_tex() {
        let args = vec!["brief", "tex", "letter.toml"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Tex { input, output } => {
                assert_eq!(input, PathBuf::from("letter.toml"));
                assert!(output.is_none());
            }
            _ => panic!("Expected Tex command"),
        }
    }

    #[test]
    fn test_cli_parse_pdf_with_config() {
        let args = vec![
            "brief",
            "pdf",
            "letter.toml",
            "-o",
            "out/letter.pdf",
            "--config",
            "brief.toml",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Pdf {
                input,
                output,
                config,
                format,
            } => {
                assert_eq!(input, PathBuf::from("letter.toml"));
                assert_eq!(output, Some(PathBuf::from("out/letter.pdf")));
                assert_eq!(config, Some(PathBuf::from("brief.toml")));
                assert!(matches!(format, OutputFormat::Text));
            }
            _ => panic!("Expected Pdf command"),
        }
    }

    #[test]
    fn test_cli_parse_check_json() {
        let args = vec!["brief", "check", "letter.toml", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check { input, format } => {
                assert_eq!(input, PathBuf::from("letter.toml"));
                assert!(matches!(format, OutputFormat::Json));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_pdf_json() {
        let args = vec!["brief", "pdf", "letter.toml", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Pdf { format, .. } => assert!(matches!(format, OutputFormat::Json)),
            _ => panic!("Expected Pdf command"),
        }
    }

    #[test]
    fn test_failure_report_formats() {
        let failure = CompileFailure::new(vec![Diagnostic::new(
            "./letter.tex",
            Some(40),
            "Undefined control sequence.",
        )
        .with_context(["./letter.tex:40: Undefined control sequence.", "l.40 \\Foo"])]);

        let text = failure_report(&failure, OutputFormat::Text).unwrap();
        assert!(text.starts_with("Error in ./letter.tex, line 40: Undefined control sequence."));
        assert!(text.contains("    l.40 \\Foo"));

        let json = failure_report(&failure, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["source"], "./letter.tex");
        assert_eq!(value[0]["line"], 40);
        assert_eq!(value[0]["message"], "Undefined control sequence.");
        assert_eq!(value[0]["context"][1], "l.40 \\Foo");
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["brief", "pdf"]).is_err());
    }

    #[test]
    fn test_prepare_letter_rejects_incomplete() {
        let file = LetterFile::from_toml_str("subject = \"Hallo\"").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let err = prepare_letter(&file, date).unwrap_err();
        assert!(err.to_string().contains("sender.name"));
    }

    #[test]
    fn test_check_report_json() {
        let file = LetterFile::from_toml_str("subject = \"Hallo\"").unwrap();
        let report = CheckReport::new(Path::new("letter.toml"), &file);
        assert!(!report.is_complete());

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file"], "letter.toml");
        assert_eq!(json["missing"][0], "sender.name");
    }
}
