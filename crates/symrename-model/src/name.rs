//! Dot-separated qualified names.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator between qualified name segments.
pub const SEPARATOR: char = '.';

/// A qualified name: `App.Controls.Button`, `App.Controls.Button.Text`.
///
/// Always non-empty with no empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QualifiedName(SmolStr);

/// Error for a string that is not a well-formed qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("empty name")]
    Empty,

    #[error("empty segment in '{0}'")]
    EmptySegment(String),

    #[error("invalid character {ch:?} in '{name}'")]
    InvalidChar { name: String, ch: char },
}

impl QualifiedName {
    /// Parse a dotted name, rejecting empty segments.
    pub fn parse(text: &str) -> Result<Self, NameError> {
        if text.is_empty() {
            return Err(NameError::Empty);
        }
        for segment in text.split(SEPARATOR) {
            if segment.is_empty() {
                return Err(NameError::EmptySegment(text.to_string()));
            }
            if let Some(ch) = segment.chars().find(|c| !is_name_char(*c)) {
                return Err(NameError::InvalidChar {
                    name: text.to_string(),
                    ch,
                });
            }
        }
        Ok(Self(SmolStr::new(text)))
    }

    /// Build a name from a single simple segment.
    pub fn simple(name: &str) -> Result<Self, NameError> {
        check_simple_name(name)?;
        Ok(Self(SmolStr::new(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// The last segment.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }

    /// Everything before the last separator, or `""` for a single segment.
    pub fn namespace_prefix(&self) -> &str {
        match self.0.rfind(SEPARATOR) {
            Some(pos) => &self.0[..pos],
            None => "",
        }
    }

    /// Split into the containing name and the last segment.
    ///
    /// Returns `None` for a single-segment name.
    pub fn split_last(&self) -> Option<(QualifiedName, &str)> {
        let pos = self.0.rfind(SEPARATOR)?;
        Some((Self(SmolStr::new(&self.0[..pos])), &self.0[pos + 1..]))
    }

    /// Replace the last segment, keeping the prefix.
    pub fn with_simple_name(&self, name: &str) -> Result<Self, NameError> {
        check_simple_name(name)?;
        let prefix = self.namespace_prefix();
        if prefix.is_empty() {
            Ok(Self(SmolStr::new(name)))
        } else {
            Ok(Self(SmolStr::new(format!("{prefix}{SEPARATOR}{name}"))))
        }
    }

    /// Append a simple segment.
    pub fn join(&self, name: &str) -> Result<Self, NameError> {
        check_simple_name(name)?;
        Ok(Self(SmolStr::new(format!("{}{SEPARATOR}{name}", self.0))))
    }
}

/// Check that `name` is usable as a single segment.
pub fn check_simple_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    match name.chars().find(|c| !is_name_char(*c)) {
        Some(ch) => Err(NameError::InvalidChar {
            name: name.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

fn is_name_char(c: char) -> bool {
    c != SEPARATOR && c != ';' && !c.is_whitespace() && !c.is_control()
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QualifiedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.0.to_string()
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert_eq!(QualifiedName::parse(""), Err(NameError::Empty));
        assert!(matches!(
            QualifiedName::parse("App..Foo"),
            Err(NameError::EmptySegment(_))
        ));
        assert!(QualifiedName::parse(".Foo").is_err());
        assert!(QualifiedName::parse("Foo.").is_err());
        assert!(QualifiedName::parse("App Foo").is_err());
    }

    #[test]
    fn test_prefix_and_simple_name() {
        let name = QualifiedName::parse("App.Controls.Button").unwrap();
        assert_eq!(name.simple_name(), "Button");
        assert_eq!(name.namespace_prefix(), "App.Controls");
        assert_eq!(name.segments().count(), 3);

        let single = QualifiedName::parse("Button").unwrap();
        assert_eq!(single.simple_name(), "Button");
        assert_eq!(single.namespace_prefix(), "");
        assert!(single.split_last().is_none());
    }

    #[test]
    fn test_with_simple_name_keeps_prefix() {
        let name = QualifiedName::parse("App.Foo").unwrap();
        assert_eq!(name.with_simple_name("Bar").unwrap().as_str(), "App.Bar");

        let global = QualifiedName::parse("Foo").unwrap();
        assert_eq!(global.with_simple_name("Bar").unwrap().as_str(), "Bar");

        assert!(name.with_simple_name("A.B").is_err());
    }

    #[test]
    fn test_split_last() {
        let name = QualifiedName::parse("App.Widget.Color").unwrap();
        let (ty, member) = name.split_last().unwrap();
        assert_eq!(ty.as_str(), "App.Widget");
        assert_eq!(member, "Color");
    }

    #[test]
    fn test_serde_validates() {
        let name: QualifiedName = serde_json::from_str("\"App.Foo\"").unwrap();
        assert_eq!(name.as_str(), "App.Foo");
        assert!(serde_json::from_str::<QualifiedName>("\"App..Foo\"").is_err());
    }
}
