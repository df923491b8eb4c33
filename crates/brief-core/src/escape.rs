//! Escaping of free text for LaTeX
//!
//! [`escape`] turns arbitrary user input into text that can be placed inside
//! a macro argument without changing the meaning of the markup.

/// Replacement for the escape introducer itself
pub const BACKSLASH: &str = "\\textbackslash ";

/// Characters with a special meaning in LaTeX and their escaped spelling
///
/// The backslash is not part of this table; it is handled by [`BACKSLASH`].
pub const REPLACEMENTS: &[(char, &str)] = &[
    ('%', "\\%"),
    ('$', "\\$"),
    ('{', "\\{"),
    ('}', "\\}"),
    ('_', "\\_"),
    ('&', "\\&"),
    ('#', "\\#"),
    ('§', "\\S "),
    ('€', "\\euro "),
    ('~', "\\textasciitilde "),
    ('^', "\\textasciicircum "),
    ('|', "\\textbar "),
    ('°', "\\degree "),
    ('<', "\\textless "),
    ('>', "\\textgreater "),
    ('£', "\\pounds "),
    ('™', "\\texttrademark "),
    ('©', "\\copyright "),
    ('®', "\\textregistered "),
    ('†', "\\dag "),
    ('‡', "\\ddag "),
    ('¶', "\\P "),
    ('¿', "\\textquestiondown "),
    ('¡', "\\textexclamdown "),
];

/// Escape every LaTeX special character in `text`
///
/// Each input character is looked at exactly once, so the backslashes that
/// the replacements introduce are never escaped again. Applying `escape`
/// twice is therefore not a no-op: the second pass escapes the backslashes
/// produced by the first.
///
/// # Example
///
/// ```
/// use brief_core::escape;
///
/// assert_eq!(escape("50% off"), "50\\% off");
/// assert_eq!(escape("a\\b"), "a\\textbackslash b");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match replacement(c) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    out
}

/// Whether `text` contains anything [`escape`] would rewrite
pub fn needs_escaping(text: &str) -> bool {
    text.chars().any(|c| replacement(c).is_some())
}

fn replacement(c: char) -> Option<&'static str> {
    if c == '\\' {
        return Some(BACKSLASH);
    }
    REPLACEMENTS
        .iter()
        .find(|(special, _)| *special == c)
        .map(|(_, escaped)| *escaped)
}
