//! Resolved references to mutation targets.

use std::cmp::Ordering;

use crate::config::Configuration;
use crate::error::PathRefError;
use crate::provider::{JsonProvider, Lookup, PropertyKey};
use crate::types::{Accessor, NormalizedPath, PathComponent};

/// Reference to an element of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayIndexRef {
    parent: NormalizedPath,
    index: usize,
}

impl ArrayIndexRef {
    pub fn parent(&self) -> &NormalizedPath {
        &self.parent
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Reference to a single property of a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectPropertyRef {
    parent: NormalizedPath,
    property: String,
}

impl ObjectPropertyRef {
    pub fn parent(&self) -> &NormalizedPath {
        &self.parent
    }

    pub fn property(&self) -> &str {
        &self.property
    }
}

/// Reference to several sibling properties of one map, e.g. the result of
/// `$['a','b']`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectMultiPropertyRef {
    parent: NormalizedPath,
    properties: Vec<String>,
}

impl ObjectMultiPropertyRef {
    pub fn parent(&self) -> &NormalizedPath {
        &self.parent
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }
}

/// A resolved location in a document that a mutation can be applied to.
///
/// References hold the location of their parent container, not the
/// container itself. Every operation borrows the document for the duration
/// of the call and resolves the parent inside it.
///
/// Because the parent is found by location, a mutation that shifts an array
/// on the parent's path redirects references applied after it: once
/// `$.arr[0]` is deleted, a reference with parent `$.arr[1]` targets the
/// element that used to be `$.arr[2]`. Apply several references through
/// [`PathRefs`](crate::PathRefs), which orders them so that this cannot
/// happen.
///
/// References order by descending accessor (see [`Accessor::sort_key`]), so
/// sorting a batch of references into the same array before deleting them
/// removes higher indices first and never shifts a pending target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathRef {
    /// The document root.
    Root,
    ArrayIndex(ArrayIndexRef),
    ObjectProperty(ObjectPropertyRef),
    ObjectMultiProperty(ObjectMultiPropertyRef),
    /// The path resolved to nothing. Every operation succeeds without effect.
    NoOp,
}

/// Reference to a property of the map at `parent`.
pub fn create_property(parent: NormalizedPath, property: impl Into<String>) -> PathRef {
    PathRef::ObjectProperty(ObjectPropertyRef {
        parent,
        property: property.into(),
    })
}

/// Reference to several properties of the map at `parent`.
pub fn create_multi_property<I, S>(parent: NormalizedPath, properties: I) -> PathRef
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PathRef::ObjectMultiProperty(ObjectMultiPropertyRef {
        parent,
        properties: properties.into_iter().map(Into::into).collect(),
    })
}

/// Reference to element `index` of the array at `parent`.
pub fn create_index(parent: NormalizedPath, index: usize) -> PathRef {
    PathRef::ArrayIndex(ArrayIndexRef { parent, index })
}

/// Reference to the document root.
pub fn create_root() -> PathRef {
    PathRef::Root
}

impl PathRef {
    /// The accessor identifying the target within its parent.
    pub fn accessor(&self) -> Accessor<'_> {
        match self {
            PathRef::Root => Accessor::Root,
            PathRef::ArrayIndex(r) => Accessor::Index(r.index),
            PathRef::ObjectProperty(r) => Accessor::Property(&r.property),
            PathRef::ObjectMultiProperty(r) => Accessor::Properties(&r.properties),
            PathRef::NoOp => Accessor::None,
        }
    }

    /// Location of the container holding the target. `None` for the root
    /// and the no-op sentinel.
    pub fn parent(&self) -> Option<&NormalizedPath> {
        match self {
            PathRef::ArrayIndex(r) => Some(&r.parent),
            PathRef::ObjectProperty(r) => Some(&r.parent),
            PathRef::ObjectMultiProperty(r) => Some(&r.parent),
            PathRef::Root | PathRef::NoOp => None,
        }
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self, PathRef::NoOp)
    }

    /// Reads the current value at the target, one entry per targeted slot.
    ///
    /// The root yields the whole document, a multi-property reference one
    /// entry per key, and the no-op sentinel nothing. A parent that no
    /// longer resolves reads as [`Lookup::Undefined`].
    pub fn get<'v, P: JsonProvider>(
        &self,
        doc: &'v P::Value,
        conf: &Configuration<P>,
    ) -> Vec<Lookup<&'v P::Value>> {
        let provider = conf.json_provider();
        match self {
            PathRef::Root => vec![Lookup::Present(doc)],
            PathRef::NoOp => Vec::new(),
            PathRef::ArrayIndex(r) => {
                let parent = lookup_parent(doc, &r.parent, provider);
                vec![parent.map_or(Lookup::Undefined, |p| provider.get_array_index(p, r.index))]
            }
            PathRef::ObjectProperty(r) => {
                let parent = lookup_parent(doc, &r.parent, provider);
                vec![parent.map_or(Lookup::Undefined, |p| provider.get_map_value(p, &r.property))]
            }
            PathRef::ObjectMultiProperty(r) => {
                let parent = lookup_parent(doc, &r.parent, provider);
                r.properties
                    .iter()
                    .map(|key| parent.map_or(Lookup::Undefined, |p| provider.get_map_value(p, key)))
                    .collect()
            }
        }
    }

    /// Replaces the target value.
    pub fn set<P>(
        &self,
        doc: &mut P::Value,
        value: P::Value,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError>
    where
        P: JsonProvider,
        P::Value: Clone,
    {
        let provider = conf.json_provider();
        match self {
            PathRef::Root => Err(PathRefError::invalid(
                "invalid set operation, $ can not be replaced",
            )),
            PathRef::NoOp => Ok(()),
            PathRef::ArrayIndex(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "set") else {
                    return Ok(());
                };
                provider.set_array_index(parent, r.index, value)?;
                Ok(())
            }
            PathRef::ObjectProperty(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "set") else {
                    return Ok(());
                };
                provider.set_property(parent, Some(r.property.as_str()), value)?;
                Ok(())
            }
            PathRef::ObjectMultiProperty(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "set") else {
                    return Ok(());
                };
                for property in &r.properties {
                    provider.set_property(parent, Some(property.as_str()), value.clone())?;
                }
                Ok(())
            }
        }
    }

    /// Removes the target from its parent.
    pub fn delete<P: JsonProvider>(
        &self,
        doc: &mut P::Value,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError> {
        let provider = conf.json_provider();
        match self {
            PathRef::Root => Err(PathRefError::invalid(
                "invalid delete operation, $ can not be deleted",
            )),
            PathRef::NoOp => Ok(()),
            PathRef::ArrayIndex(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "delete") else {
                    return Ok(());
                };
                provider.remove_property(parent, PropertyKey::Index(r.index))?;
                Ok(())
            }
            PathRef::ObjectProperty(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "delete") else {
                    return Ok(());
                };
                provider.remove_property(parent, PropertyKey::Name(&r.property))?;
                Ok(())
            }
            PathRef::ObjectMultiProperty(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "delete") else {
                    return Ok(());
                };
                for property in &r.properties {
                    provider.remove_property(parent, PropertyKey::Name(property))?;
                }
                Ok(())
            }
        }
    }

    /// Appends `value` to the array found at the target.
    ///
    /// A missing or null target is left alone. On the root reference the root
    /// itself must be an array.
    pub fn add<P: JsonProvider>(
        &self,
        doc: &mut P::Value,
        value: P::Value,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError> {
        let provider = conf.json_provider();
        match self {
            PathRef::Root => {
                if !provider.is_array(doc) {
                    return Err(PathRefError::invalid(
                        "invalid add operation, $ is not an array",
                    ));
                }
                provider.set_property(doc, None, value)?;
                Ok(())
            }
            PathRef::NoOp => Ok(()),
            PathRef::ArrayIndex(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "add") else {
                    return Ok(());
                };
                let target = provider.get_array_index_mut(parent, r.index);
                add_to(target, value, provider)
            }
            PathRef::ObjectProperty(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "add") else {
                    return Ok(());
                };
                let target = provider.get_map_value_mut(parent, &r.property);
                add_to(target, value, provider)
            }
            PathRef::ObjectMultiProperty(_) => Err(PathRefError::invalid(
                "add can not be performed to multiple properties",
            )),
        }
    }

    /// Sets `key` to `value` on the map found at the target.
    ///
    /// A missing or null target is left alone. On the root reference the root
    /// itself must be a map.
    pub fn put<P: JsonProvider>(
        &self,
        doc: &mut P::Value,
        key: &str,
        value: P::Value,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError> {
        let provider = conf.json_provider();
        match self {
            PathRef::Root => {
                if !provider.is_map(doc) {
                    return Err(PathRefError::invalid(
                        "invalid put operation, $ is not a map",
                    ));
                }
                provider.set_property(doc, Some(key), value)?;
                Ok(())
            }
            PathRef::NoOp => Ok(()),
            PathRef::ArrayIndex(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "put") else {
                    return Ok(());
                };
                let target = provider.get_array_index_mut(parent, r.index);
                put_into(target, key, value, provider)
            }
            PathRef::ObjectProperty(r) => {
                let Some(parent) = resolve_parent(doc, &r.parent, provider, "put") else {
                    return Ok(());
                };
                let target = provider.get_map_value_mut(parent, &r.property);
                put_into(target, key, value, provider)
            }
            PathRef::ObjectMultiProperty(_) => Err(PathRefError::invalid(
                "put can not be performed to multiple properties",
            )),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            PathRef::Root => 0,
            PathRef::ArrayIndex(_) => 1,
            PathRef::ObjectProperty(_) => 2,
            PathRef::ObjectMultiProperty(_) => 3,
            PathRef::NoOp => 4,
        }
    }
}

impl Ord for PathRef {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .accessor()
            .sort_key()
            .cmp(&self.accessor().sort_key())
            .then_with(|| other.parent().cmp(&self.parent()))
            .then_with(|| other.rank().cmp(&self.rank()))
            .then_with(|| match (self, other) {
                (PathRef::ObjectMultiProperty(a), PathRef::ObjectMultiProperty(b)) => {
                    b.properties.cmp(&a.properties)
                }
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for PathRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn lookup_parent<'v, P: JsonProvider>(
    doc: &'v P::Value,
    path: &NormalizedPath,
    provider: &P,
) -> Option<&'v P::Value> {
    let mut current = doc;
    for component in path.components() {
        current = match component {
            PathComponent::Key(key) => provider.get_map_value(current, key),
            PathComponent::Index(index) => provider.get_array_index(current, *index),
        }
        .present()?;
    }
    Some(current)
}

/// Walks `path` from the document root to the parent container.
///
/// Returns `None` when an earlier mutation removed or replaced a container
/// along the way.
fn resolve_parent<'v, P: JsonProvider>(
    doc: &'v mut P::Value,
    path: &NormalizedPath,
    provider: &P,
    op: &str,
) -> Option<&'v mut P::Value> {
    let mut current = doc;
    for component in path.components() {
        let next = match component {
            PathComponent::Key(key) => provider.get_map_value_mut(current, key),
            PathComponent::Index(index) => provider.get_array_index_mut(current, *index),
        };
        match next {
            Lookup::Present(value) => current = value,
            Lookup::Undefined | Lookup::Null => {
                log::debug!("{} skipped, parent {} no longer resolves", op, path);
                return None;
            }
        }
    }
    Some(current)
}

fn add_to<P: JsonProvider>(
    target: Lookup<&mut P::Value>,
    value: P::Value,
    provider: &P,
) -> Result<(), PathRefError> {
    let Some(target) = target.present() else {
        return Ok(());
    };
    if !provider.is_array(target) {
        return Err(PathRefError::invalid("can only add to an array"));
    }
    provider.set_property(target, None, value)?;
    Ok(())
}

fn put_into<P: JsonProvider>(
    target: Lookup<&mut P::Value>,
    key: &str,
    value: P::Value,
    provider: &P,
) -> Result<(), PathRefError> {
    let Some(target) = target.present() else {
        return Ok(());
    };
    if !provider.is_map(target) {
        return Err(PathRefError::invalid("can only add properties to a map"));
    }
    provider.set_property(target, Some(key), value)?;
    Ok(())
}
