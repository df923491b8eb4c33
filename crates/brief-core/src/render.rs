//! Field registry to LaTeX renderer
//!
//! Turns a [`FieldRegistry`] into the complete `g-brief` source: a fixed
//! preamble, the fields in registry order, and the `\endinput` trailer.

use std::fmt;

use crate::field::{Field, FieldRegistry, FieldValue};
use crate::fields;

/// Lines written before the first field
pub const PREAMBLE: &[&str] = &[
    "\\documentclass[11pt]{g-brief}",
    "\\usepackage[utf8]{inputenc}",
    "\\usepackage[ngerman]{babel}",
    "\\usepackage{enumerate}",
    "\\usepackage{gensymb}",
    "\\usepackage{eurosym}",
    "",
];

/// Final line of every rendered document
pub const TRAILER: &str = "\\endinput";

/// Prefix that comments out a disabled switch
pub const COMMENT: &str = "%";

/// Extra argument of the closing salutation: space left for the signature
pub const CLOSING_SPACING: &str = "{1cm}";

/// A rendered letter as an ordered list of lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    lines: Vec<String>,
}

impl RenderedDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The document text: lines joined by `\n`, no newline after the trailer
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Renderer for `g-brief` letters
pub struct Renderer;

impl Renderer {
    /// Render the registry to a complete document
    pub fn render(registry: &FieldRegistry) -> RenderedDocument {
        let mut lines: Vec<String> = PREAMBLE.iter().map(|l| l.to_string()).collect();
        for field in registry {
            Self::render_field(field, &mut lines);
        }
        lines.push(TRAILER.to_string());
        RenderedDocument { lines }
    }

    /// Append the lines of a single field
    fn render_field(field: &Field, out: &mut Vec<String>) {
        let token = field.control_token();
        match field.value() {
            FieldValue::Flag(true) => out.push(token.to_string()),
            FieldValue::Flag(false) => out.push(format!("{}{}", COMMENT, token)),
            FieldValue::Lines(lines) if field.is_body() => {
                out.extend(lines.iter().cloned());
            }
            FieldValue::Lines(lines) => {
                out.push(format!("{}{{", token));
                out.extend(lines.iter().cloned());
                out.push("}".to_string());
            }
            FieldValue::Text(value) => {
                let mut line = format!("{}{{{}}}", token, value);
                if field.key() == fields::GRUSS {
                    line.push_str(CLOSING_SPACING);
                }
                out.push(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{g_brief, ADRESSE, ANLAGEN, FALTMARKEN, GRUSS, NAME, TEXT};

    #[test]
    fn test_default_document() {
        let doc = Renderer::render(&g_brief());
        let lines = doc.lines();

        assert_eq!(lines[0], "\\documentclass[11pt]{g-brief}");
        assert_eq!(lines[PREAMBLE.len() - 1], "");
        assert_eq!(lines[PREAMBLE.len()], "\\lochermarke");
        assert!(lines.contains(&"%\\klassisch".to_string()));
        assert!(lines.contains(&"\\Name{}".to_string()));
        assert!(lines.contains(&"\\Gruss{}{1cm}".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some(TRAILER));
    }

    #[test]
    fn test_text_field() {
        let mut registry = g_brief();
        registry.set_value(NAME, "John Doe").unwrap();
        let doc = Renderer::render(&registry);
        assert!(doc.lines().contains(&"\\Name{John Doe}".to_string()));
    }

    #[test]
    fn test_closing_gets_spacing() {
        let mut registry = g_brief();
        registry.set_value(GRUSS, "Mit freundlichen Grüßen").unwrap();
        let doc = Renderer::render(&registry);
        assert!(doc
            .lines()
            .contains(&"\\Gruss{Mit freundlichen Grüßen}{1cm}".to_string()));
    }

    #[test]
    fn test_lines_field_is_wrapped() {
        let mut registry = g_brief();
        registry
            .set_value(
                ADRESSE,
                vec!["Erika Mustermann\\\\".to_string(), "Berlin".to_string()],
            )
            .unwrap();
        let doc = Renderer::render(&registry);
        let lines = doc.lines();
        let start = lines.iter().position(|l| l == "\\Adresse{").unwrap();

        assert_eq!(lines[start + 1], "Erika Mustermann\\\\");
        assert_eq!(lines[start + 2], "Berlin");
        assert_eq!(lines[start + 3], "}");
    }

    #[test]
    fn test_empty_lines_field_still_wrapped() {
        let doc = Renderer::render(&g_brief());
        let lines = doc.lines();
        let start = lines.iter().position(|l| l == "\\Anlagen{").unwrap();
        assert_eq!(lines[start + 1], "}");
    }

    #[test]
    fn test_body_is_verbatim() {
        let mut registry = g_brief();
        let body = vec![
            "\\begin{document}".to_string(),
            "100% raw".to_string(),
            "\\end{document}".to_string(),
        ];
        registry.set_value(TEXT, body.clone()).unwrap();
        let doc = Renderer::render(&registry);
        let lines = doc.lines();
        let n = lines.len();

        assert_eq!(&lines[n - 4..n - 1], body.as_slice());
        assert!(!lines.iter().any(|l| l.starts_with("text")));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut registry = g_brief();
        registry.set_value(NAME, "Jane").unwrap();
        registry.set_value(ANLAGEN, vec!["CV".to_string()]).unwrap();

        let first = Renderer::render(&registry);
        let second = Renderer::render(&registry);
        assert_eq!(first.to_text(), second.to_text());
    }

    #[test]
    fn test_toggling_flag_keeps_layout() {
        let mut registry = g_brief();
        let on = Renderer::render(&registry);
        registry.set_value(FALTMARKEN, false).unwrap();
        let off = Renderer::render(&registry);

        assert_eq!(on.len(), off.len());
        let changed: Vec<_> = on
            .lines()
            .iter()
            .zip(off.lines())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .collect();
        assert_eq!(changed.len(), 1);
        let (_, (before, after)) = changed[0];
        assert_eq!(before, "\\faltmarken");
        assert_eq!(after, "%\\faltmarken");
    }

    #[test]
    fn test_text_has_no_trailing_newline() {
        let text = Renderer::render(&g_brief()).to_text();
        assert!(text.ends_with("\\endinput"));
        assert!(text.contains("\\usepackage{eurosym}\n\n\\lochermarke"));
    }
}
