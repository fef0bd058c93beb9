//! Path normalization
//!
//! Callers may hand in Windows-style paths. Backends only ever see
//! [`ObjectPath`], which can only be built by normalizing a raw string.

use std::fmt;

/// Replace every backslash with a forward slash.
///
/// Pure, total and idempotent; every other character is kept as is.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

/// A normalized object key or directory prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Normalize a raw path
    pub fn new(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the marker object that represents this path as a directory
    pub fn dir_marker(&self) -> String {
        if self.0.ends_with('/') {
            self.0.clone()
        } else {
            format!("{}/", self.0)
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_backslashes() {
        assert_eq!(normalize("a\\b\\c"), "a/b/c");
        assert_eq!(normalize("\\leading"), "/leading");
        assert_eq!(normalize("mixed\\sep/already"), "mixed/sep/already");
    }

    #[test]
    fn test_normalize_preserves_other_characters() {
        let raw = "dir with space\\ünïcode/file.tar.gz?v=1";
        let normalized = normalize(raw);
        assert!(!normalized.contains('\\'));
        assert_eq!(normalized, "dir with space/ünïcode/file.tar.gz?v=1");
        assert_eq!(normalized.len(), raw.len());
    }

    #[test]
    fn test_normalize_idempotent() {
        for raw in ["", "plain", "a\\b", "\\\\server\\share", "x/y\\z/"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_object_path() {
        let path = ObjectPath::new("photos\\2024");
        assert_eq!(path.as_str(), "photos/2024");
        assert_eq!(path.to_string(), "photos/2024");
        assert_eq!(path.dir_marker(), "photos/2024/");
        assert_eq!(ObjectPath::new("logs/").dir_marker(), "logs/");
    }
}
