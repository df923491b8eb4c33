//! Helpers that turn raw multi-line input into field lines
//!
//! Every helper escapes its input, so raw user text can be passed straight
//! in. The results are meant for lines fields, which are emitted verbatim.

use crate::escape::escape;

/// LaTeX forced line break appended to every prepared line
pub const LINE_BREAK: &str = "\\\\";

pub const BEGIN_DOCUMENT: &str = "\\begin{document}";
pub const BEGIN_LETTER: &str = "\\begin{g-brief}";
pub const END_LETTER: &str = "\\end{g-brief}";
pub const END_DOCUMENT: &str = "\\end{document}";

/// Escape a single line of user text
pub fn prepare_line(line: &str) -> String {
    escape(line)
}

/// Split raw text into escaped lines, each ending in a forced line break
///
/// `\r\n` line endings are accepted.
pub fn prepare_text(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .map(|line| format!("{}{}", prepare_line(line), LINE_BREAK))
        .collect()
}

/// Prepare the letter body: [`prepare_text`] wrapped in the document and
/// `g-brief` environments
pub fn prepare_content(raw: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(BEGIN_DOCUMENT.to_string());
    lines.push(BEGIN_LETTER.to_string());
    lines.extend(prepare_text(raw));
    lines.push(END_LETTER.to_string());
    lines.push(END_DOCUMENT.to_string());
    lines
}
