//! LaTeX log parsing
//!
//! With `-file-line-error` every error in the log starts with a line of the
//! form `./letter.tex:42: Undefined control sequence.`; the lines after it
//! show where in the source the error occurred.

use std::sync::OnceLock;

use brief_core::Diagnostic;
use regex::Regex;

fn error_line() -> &'static Regex {
    static ERROR_RE: OnceLock<Regex> = OnceLock::new();
    ERROR_RE.get_or_init(|| {
        Regex::new(r"^(?P<file>[^:\s][^:]*):(?P<line>[0-9]*):\s*(?P<message>.*)$").unwrap()
    })
}

/// Extract every error from a LaTeX log
///
/// Each diagnostic's context holds up to `context_size` log lines starting
/// with the error line itself.
pub fn parse_log(log: &str, context_size: usize) -> Vec<Diagnostic> {
    let lines: Vec<&str> = log.lines().collect();
    let mut diagnostics = Vec::new();

    for (n, line) in lines.iter().enumerate() {
        let Some(caps) = error_line().captures(line) else {
            continue;
        };
        let end = (n + context_size.max(1)).min(lines.len());
        let diag = Diagnostic::new(
            &caps["file"],
            caps["line"].parse().ok(),
            caps["message"].trim_end(),
        )
        .with_context(lines[n..end].iter().copied());
        diagnostics.push(diag);
    }

    diagnostics
}

/// Last `count` non-empty lines of a log, used when no error line matched
pub fn log_tail(log: &str, count: usize) -> Vec<String> {
    let lines: Vec<&str> = log.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].iter().map(|l| l.to_string()).collect()
}
