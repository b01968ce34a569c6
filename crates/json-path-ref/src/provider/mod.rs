//! Document provider boundary.
//!
//! A [`JsonProvider`] performs the primitive reads and writes that path
//! references are built from. The crate ships [`SerdeJsonProvider`] for
//! [`serde_json::Value`]; other tree representations plug in by implementing
//! the trait.

mod json_value;
pub use json_value::SerdeJsonProvider;

use crate::error::ProviderError;

/// Result of looking up a child of a container.
///
/// Keeps "absent" apart from "present but null".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The key or index does not exist.
    Undefined,
    /// The key or index exists and holds null.
    Null,
    Present(T),
}

impl<T> Lookup<T> {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Lookup::Undefined)
    }

    /// Returns true for both [`Lookup::Undefined`] and [`Lookup::Null`].
    pub fn is_nothing(&self) -> bool {
        !matches!(self, Lookup::Present(_))
    }

    pub fn present(self) -> Option<T> {
        match self {
            Lookup::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Undefined => Lookup::Undefined,
            Lookup::Null => Lookup::Null,
            Lookup::Present(value) => Lookup::Present(f(value)),
        }
    }
}

/// Key passed to [`JsonProvider::remove_property`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKey<'a> {
    Name(&'a str),
    Index(usize),
}

/// Primitive operations over a concrete document representation.
pub trait JsonProvider {
    type Value;

    fn is_array(&self, value: &Self::Value) -> bool;

    fn is_map(&self, value: &Self::Value) -> bool;

    /// Element at `index`, or [`Lookup::Undefined`] if out of range or if
    /// `parent` is not an array.
    fn get_array_index<'v>(&self, parent: &'v Self::Value, index: usize) -> Lookup<&'v Self::Value>;

    fn get_array_index_mut<'v>(
        &self,
        parent: &'v mut Self::Value,
        index: usize,
    ) -> Lookup<&'v mut Self::Value>;

    /// Value under `key`, or [`Lookup::Undefined`] if missing or if `parent`
    /// is not a map.
    fn get_map_value<'v>(&self, parent: &'v Self::Value, key: &str) -> Lookup<&'v Self::Value>;

    fn get_map_value_mut<'v>(
        &self,
        parent: &'v mut Self::Value,
        key: &str,
    ) -> Lookup<&'v mut Self::Value>;

    /// Overwrites the element at `index`.
    fn set_array_index(
        &self,
        parent: &mut Self::Value,
        index: usize,
        value: Self::Value,
    ) -> Result<(), ProviderError>;

    /// Sets `key` on a map. A `None` key appends `value` to an array.
    fn set_property(
        &self,
        parent: &mut Self::Value,
        key: Option<&str>,
        value: Self::Value,
    ) -> Result<(), ProviderError>;

    /// Removes a key from a map or an element from an array.
    fn remove_property(
        &self,
        parent: &mut Self::Value,
        key: PropertyKey<'_>,
    ) -> Result<(), ProviderError>;
}
