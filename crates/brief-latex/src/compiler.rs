//! Process-backed LaTeX compiler

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use brief_core::{Artifact, CompileFailure, CompilerBridge, Diagnostic, LetterError, Result};
use tracing::{debug, warn};

use crate::log::{log_tail, parse_log};
use crate::settings::CompilerSettings;

/// Job name used inside the scratch directory
const JOB_NAME: &str = "letter";

/// Arguments passed to every run before the configured extras
const BASE_ARGS: &[&str] = &[
    "-interaction=batchmode",
    "-halt-on-error",
    "-file-line-error",
    "-no-shell-escape",
];

/// Compiles letters by running a LaTeX engine in a scratch directory
#[derive(Debug, Clone, Default)]
pub struct LatexCompiler {
    settings: CompilerSettings,
}

impl LatexCompiler {
    pub fn new(settings: CompilerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Path of the configured program, if it can be found
    pub fn program_path(&self) -> Option<PathBuf> {
        which::which(&self.settings.program).ok()
    }

    fn command(&self, workdir: &Path, tex_file: &Path) -> Result<Command> {
        let mut cmd = Command::new(&self.settings.program);
        cmd.args(BASE_ARGS)
            .args(&self.settings.args)
            .arg(tex_file)
            .current_dir(workdir);

        if let Some(texinputs) = self.texinputs()? {
            cmd.env("TEXINPUTS", texinputs);
        }
        Ok(cmd)
    }

    /// Search path with the configured directories first
    ///
    /// The trailing empty entry keeps the engine's built-in search path.
    fn texinputs(&self) -> Result<Option<OsString>> {
        if self.settings.search_paths.is_empty() {
            return Ok(None);
        }

        let cwd = env::current_dir()?;
        let mut entries: Vec<PathBuf> = self
            .settings
            .search_paths
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { cwd.join(p) })
            .collect();
        entries.push(cwd);
        entries.push(PathBuf::new());

        env::join_paths(entries)
            .map(Some)
            .map_err(|e| LetterError::Compiler(format!("invalid search path: {e}")))
    }

    fn run(&self, workdir: &Path, tex_file: &Path) -> Result<Output> {
        let mut cmd = self.command(workdir, tex_file)?;
        debug!("Running {:?}", cmd);
        cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => LetterError::Compiler(format!(
                "'{}' not found; install a TeX distribution or set compiler.program",
                self.settings.program
            )),
            _ => LetterError::Compiler(format!("failed to run '{}': {e}", self.settings.program)),
        })
    }

    fn failure(&self, log: &str, output: &Output) -> CompileFailure {
        let mut diagnostics = parse_log(log, self.settings.log_context);
        if diagnostics.is_empty() {
            let tail = if log.is_empty() {
                log_tail(&String::from_utf8_lossy(&output.stderr), self.settings.log_context)
            } else {
                log_tail(log, self.settings.log_context)
            };
            let message = match output.status.code() {
                Some(code) => format!("{} exited with status {code}", self.settings.program),
                None => format!("{} was terminated", self.settings.program),
            };
            diagnostics.push(Diagnostic::new(self.settings.program.as_str(), None, message).with_context(tail));
        }
        CompileFailure::new(diagnostics)
    }
}

impl CompilerBridge for LatexCompiler {
    fn name(&self) -> &str {
        &self.settings.program
    }

    fn is_available(&self) -> bool {
        self.program_path().is_some()
    }

    fn compile(&self, source: &str) -> Result<Artifact> {
        let workdir = tempfile::tempdir()?;
        let tex_file = PathBuf::from(format!("{JOB_NAME}.tex"));
        let log_file = workdir.path().join(format!("{JOB_NAME}.log"));
        let pdf_file = workdir.path().join(format!("{JOB_NAME}.pdf"));
        fs::write(workdir.path().join(&tex_file), source)?;

        for pass in 1..=self.settings.passes.max(1) {
            debug!("{} pass {pass}", self.settings.program);
            let output = self.run(workdir.path(), &tex_file)?;
            if !output.status.success() {
                let log = fs::read(&log_file)
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                    .unwrap_or_default();
                let failure = self.failure(&log, &output);
                warn!("{} failed with {} error(s)", self.settings.program, failure.len());
                return Err(failure.into());
            }
        }

        let bytes = fs::read(&pdf_file).map_err(|e| {
            LetterError::Compiler(format!("{} produced no PDF: {e}", self.settings.program))
        })?;
        debug!("Compiled {} bytes of PDF", bytes.len());
        Ok(Artifact::new(bytes))
    }
}
