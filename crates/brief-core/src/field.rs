//! Field model and the ordered field registry
//!
//! A [`FieldRegistry`] is fixed at construction: its fields, their order and
//! the shape of each field's value never change. Only values do.

use std::fmt;

use crate::error::{LetterError, Result};

/// The shape of a field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    /// On/off switch
    Flag,
    /// Single line of text
    Text,
    /// Ordered sequence of pre-formatted lines
    Lines,
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldShape::Flag => write!(f, "flag"),
            FieldShape::Text => write!(f, "text"),
            FieldShape::Lines => write!(f, "lines"),
        }
    }
}

/// The value held by a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    /// Lines without trailing newlines
    Lines(Vec<String>),
}

impl FieldValue {
    /// Shape of this value
    pub fn shape(&self) -> FieldShape {
        match self {
            FieldValue::Flag(_) => FieldShape::Flag,
            FieldValue::Text(_) => FieldShape::Text,
            FieldValue::Lines(_) => FieldShape::Lines,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::Lines(value)
    }
}

/// How a field is written to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// A macro or switch
    Directive,
    /// The free-form letter body, written verbatim without any wrapping
    Body,
}

/// A named field of a letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    key: &'static str,
    control_token: &'static str,
    role: FieldRole,
    default: FieldValue,
    value: FieldValue,
}

impl Field {
    /// A switch emitted as a bare macro, commented out when off
    pub fn flag(key: &'static str, control_token: &'static str, default: bool) -> Self {
        Self::directive(key, control_token, FieldValue::Flag(default))
    }

    /// A macro taking one text argument
    pub fn text(key: &'static str, control_token: &'static str) -> Self {
        Self::directive(key, control_token, FieldValue::Text(String::new()))
    }

    /// A macro wrapping a group of lines
    pub fn lines(key: &'static str, control_token: &'static str) -> Self {
        Self::directive(key, control_token, FieldValue::Lines(Vec::new()))
    }

    /// The letter body
    pub fn body(key: &'static str, sentinel: &'static str) -> Self {
        let mut field = Self::directive(key, sentinel, FieldValue::Lines(Vec::new()));
        field.role = FieldRole::Body;
        field
    }

    fn directive(key: &'static str, control_token: &'static str, default: FieldValue) -> Self {
        Self {
            key,
            control_token,
            role: FieldRole::Directive,
            value: default.clone(),
            default,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The LaTeX macro name (or the body sentinel)
    pub fn control_token(&self) -> &'static str {
        self.control_token
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn is_body(&self) -> bool {
        self.role == FieldRole::Body
    }

    pub fn shape(&self) -> FieldShape {
        self.default.shape()
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn default_value(&self) -> &FieldValue {
        &self.default
    }
}

/// Ordered registry of letter fields
///
/// Registry order is the order in which fields are written to the rendered
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegistry {
    fields: Vec<Field>,
}

impl FieldRegistry {
    /// Build a registry from fields in emission order
    ///
    /// Fails with [`LetterError::DuplicateField`] if two fields share a key.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.key == field.key) {
                return Err(LetterError::DuplicateField(field.key.to_string()));
            }
        }
        Ok(Self { fields })
    }

    /// Build a registry from a catalogue known to have unique keys
    pub(crate) fn from_catalogue(fields: Vec<Field>) -> Self {
        debug_assert!(Self::new(fields.clone()).is_ok());
        Self { fields }
    }

    /// Replace the value of `key`
    ///
    /// The registry is left untouched if the key is unknown or the shape does
    /// not match.
    pub fn set_value(&mut self, key: &str, value: impl Into<FieldValue>) -> Result<()> {
        let value = value.into();
        let field = self.field_mut(key)?;
        if field.shape() != value.shape() {
            return Err(LetterError::TypeMismatch {
                key: key.to_string(),
                expected: field.shape(),
                found: value.shape(),
            });
        }
        field.value = value;
        Ok(())
    }

    /// Current value of `key`
    pub fn value(&self, key: &str) -> Result<&FieldValue> {
        self.field(key).map(Field::value)
    }

    /// Current value of a flag field
    pub fn flag(&self, key: &str) -> Result<bool> {
        match self.value(key)? {
            FieldValue::Flag(on) => Ok(*on),
            other => Err(mismatch(key, FieldShape::Flag, other)),
        }
    }

    /// Current value of a text field
    pub fn text(&self, key: &str) -> Result<&str> {
        match self.value(key)? {
            FieldValue::Text(text) => Ok(text),
            other => Err(mismatch(key, FieldShape::Text, other)),
        }
    }

    /// Current value of a lines field
    pub fn lines(&self, key: &str) -> Result<&[String]> {
        match self.value(key)? {
            FieldValue::Lines(lines) => Ok(lines),
            other => Err(mismatch(key, FieldShape::Lines, other)),
        }
    }

    /// Look up a field by key
    pub fn field(&self, key: &str) -> Result<&Field> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| LetterError::UnknownField(key.to_string()))
    }

    fn field_mut(&mut self, key: &str) -> Result<&mut Field> {
        self.fields
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or_else(|| LetterError::UnknownField(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }

    /// Fields in emission order
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Keys in emission order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.key)
    }

    /// Restore every field to its default value
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default.clone();
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldRegistry {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

fn mismatch(key: &str, expected: FieldShape, found: &FieldValue) -> LetterError {
    LetterError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.shape(),
    }
}
