//! Locations and accessors shared by path references.

use std::borrow::Cow;
use std::fmt;

/// A component of a normalized path.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathComponent {
    Key(String),
    Index(usize),
}

impl From<&str> for PathComponent {
    fn from(key: &str) -> Self {
        PathComponent::Key(key.to_string())
    }
}

impl From<String> for PathComponent {
    fn from(key: String) -> Self {
        PathComponent::Key(key)
    }
}

impl From<usize> for PathComponent {
    fn from(index: usize) -> Self {
        PathComponent::Index(index)
    }
}

/// Location of a node, as the sequence of steps taken from the document root.
///
/// An empty path denotes the root itself. Renders in RFC 9535 normalized
/// path form, e.g. `$['store']['book'][0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath(Vec<PathComponent>);

impl NormalizedPath {
    /// The root location `$`.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.0
    }

    pub fn push(&mut self, component: impl Into<PathComponent>) {
        self.0.push(component.into());
    }

    /// Returns a new path one key step below this one.
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.0.push(PathComponent::Key(key.into()));
        path
    }

    /// Returns a new path one index step below this one.
    pub fn index(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(PathComponent::Index(index));
        path
    }
}

impl From<Vec<PathComponent>> for NormalizedPath {
    fn from(components: Vec<PathComponent>) -> Self {
        Self(components)
    }
}

impl FromIterator<PathComponent> for NormalizedPath {
    fn from_iter<I: IntoIterator<Item = PathComponent>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for component in &self.0 {
            match component {
                PathComponent::Key(key) => write!(f, "['{}']", escape_single_quoted(key))?,
                PathComponent::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

fn escape_single_quoted(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\'']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Separator used when rendering a multi-property accessor.
pub const MULTI_PROPERTY_SEPARATOR: &str = "&&";

/// Identifies a reference's target within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor<'a> {
    /// The `$` symbol of the root reference.
    Root,
    Index(usize),
    Property(&'a str),
    Properties(&'a [String]),
    /// The no-op sentinel has no accessor.
    None,
}

impl Accessor<'_> {
    /// String form used for ordering.
    ///
    /// Identical to the display form, except that indices are zero-padded
    /// so that lexicographic order agrees with numeric order.
    pub fn sort_key(&self) -> Cow<'_, str> {
        match self {
            Accessor::Index(index) => Cow::Owned(format!("{:020}", index)),
            Accessor::Property(key) => Cow::Borrowed(key),
            Accessor::Root => Cow::Borrowed("$"),
            Accessor::None => Cow::Borrowed(""),
            Accessor::Properties(_) => Cow::Owned(self.to_string()),
        }
    }
}

impl fmt::Display for Accessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Root => f.write_str("$"),
            Accessor::Index(index) => write!(f, "{}", index),
            Accessor::Property(key) => f.write_str(key),
            Accessor::Properties(keys) => f.write_str(&keys.join(MULTI_PROPERTY_SEPARATOR)),
            Accessor::None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_path_display() {
        assert_eq!(NormalizedPath::root().to_string(), "$");
        let path = NormalizedPath::root().key("store").key("book").index(0);
        assert_eq!(path.to_string(), "$['store']['book'][0]");
        let path = NormalizedPath::root().key("it's");
        assert_eq!(path.to_string(), r"$['it\'s']");
    }

    #[test]
    fn test_normalized_path_from_components() {
        let path: NormalizedPath = vec![PathComponent::from("a"), PathComponent::from(2)].into();
        assert_eq!(path.components().len(), 2);
        assert!(!path.is_root());
        assert_eq!(path, NormalizedPath::root().key("a").index(2));
    }

    #[test]
    fn test_accessor_display() {
        let keys = vec!["a".to_string(), "b".to_string()];
        assert_eq!(Accessor::Root.to_string(), "$");
        assert_eq!(Accessor::Index(7).to_string(), "7");
        assert_eq!(Accessor::Property("name").to_string(), "name");
        assert_eq!(Accessor::Properties(&keys).to_string(), "a&&b");
        assert_eq!(Accessor::None.to_string(), "");
    }

    #[test]
    fn test_accessor_sort_key_orders_indices_numerically() {
        let nine = Accessor::Index(9);
        let ten = Accessor::Index(10);
        assert!(nine.sort_key() < ten.sort_key());
        assert_eq!(Accessor::Property("x").sort_key(), "x");
    }
}
