use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Field names are plain strings; they match the keys of the candidate record.
pub type FieldName = String;

/// Stable identifier for a validated record type.
///
/// Typed records expose their key as an associated constant
/// (see [`crate::validation::candidate::Validated::TYPE_KEY`]) so call sites
/// refer to the constant instead of retyping the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    /// Key backed by a `'static` string, usable in `const` items.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Key built at runtime, e.g. from a schema file or configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE: TypeKey = TypeKey::from_static("Course");

    #[test]
    fn static_and_owned_keys_compare_equal() {
        assert_eq!(COURSE, TypeKey::new("Course"));
        assert_eq!(COURSE, TypeKey::from("Course"));
    }

    #[test]
    fn display_is_the_bare_name() {
        assert_eq!(COURSE.to_string(), "Course");
        assert_eq!(COURSE.as_str(), "Course");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&COURSE).unwrap();
        assert_eq!(json, "\"Course\"");
    }
}
