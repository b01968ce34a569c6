//! Applying one operation to every reference a path matched.

use crate::config::Configuration;
use crate::error::PathRefError;
use crate::path_ref::PathRef;
use crate::provider::JsonProvider;

/// Mutation applied by [`PathRefs::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Operation<V> {
    Set(V),
    Delete,
    Add(V),
    Put { key: String, value: V },
}

impl<V> Operation<V> {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Set(_) => "set",
            Operation::Delete => "delete",
            Operation::Add(_) => "add",
            Operation::Put { .. } => "put",
        }
    }
}

/// The references collected for one path evaluation.
///
/// Every bulk operation sorts the references first (see
/// [`PathRefs::sort_for_update`]) and stops at the first error. Mutations applied before the
/// error stay applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRefs {
    refs: Vec<PathRef>,
}

impl PathRefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path_ref: PathRef) {
        self.refs.push(path_ref);
    }

    pub fn len(&self) -> usize {
        self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathRef> {
        self.refs.iter()
    }

    /// Sorts into update order.
    ///
    /// References with deeper parents come first, so no mutation shifts an
    /// array that a pending reference's parent path runs through. References
    /// at the same depth follow the `Ord` impl of [`PathRef`]. The root and
    /// the no-op sentinel go last.
    pub fn sort_for_update(&mut self) {
        self.refs
            .sort_by(|a, b| parent_depth(b).cmp(&parent_depth(a)).then_with(|| a.cmp(b)));
    }

    pub fn set<P>(
        &mut self,
        doc: &mut P::Value,
        value: P::Value,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError>
    where
        P: JsonProvider,
        P::Value: Clone,
    {
        self.apply(doc, Operation::Set(value), conf)
    }

    pub fn delete<P: JsonProvider>(
        &mut self,
        doc: &mut P::Value,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError> {
        self.for_each_in_update_order("delete", |path_ref| path_ref.delete(doc, conf))
    }

    pub fn add<P>(
        &mut self,
        doc: &mut P::Value,
        value: P::Value,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError>
    where
        P: JsonProvider,
        P::Value: Clone,
    {
        self.apply(doc, Operation::Add(value), conf)
    }

    pub fn put<P>(
        &mut self,
        doc: &mut P::Value,
        key: impl Into<String>,
        value: P::Value,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError>
    where
        P: JsonProvider,
        P::Value: Clone,
    {
        let key = key.into();
        self.apply(doc, Operation::Put { key, value }, conf)
    }

    /// Sorts the references and applies `op` to each in turn.
    pub fn apply<P>(
        &mut self,
        doc: &mut P::Value,
        op: Operation<P::Value>,
        conf: &Configuration<P>,
    ) -> Result<(), PathRefError>
    where
        P: JsonProvider,
        P::Value: Clone,
    {
        let name = op.name();
        self.for_each_in_update_order(name, |path_ref| match &op {
            Operation::Set(value) => path_ref.set(doc, value.clone(), conf),
            Operation::Delete => path_ref.delete(doc, conf),
            Operation::Add(value) => path_ref.add(doc, value.clone(), conf),
            Operation::Put { key, value } => path_ref.put(doc, key, value.clone(), conf),
        })
    }

    fn for_each_in_update_order(
        &mut self,
        name: &str,
        mut f: impl FnMut(&PathRef) -> Result<(), PathRefError>,
    ) -> Result<(), PathRefError> {
        self.sort_for_update();
        log::debug!("applying {} to {} path references", name, self.refs.len());
        for path_ref in &self.refs {
            if let Err(err) = f(path_ref) {
                log::debug!("{} at accessor '{}' failed: {}", name, path_ref.accessor(), err);
                return Err(err);
            }
        }
        Ok(())
    }
}

/// Number of steps from the root to the reference's parent. `None` sorts
/// below every depth.
fn parent_depth(path_ref: &PathRef) -> Option<usize> {
    path_ref.parent().map(|parent| parent.components().len())
}

impl From<Vec<PathRef>> for PathRefs {
    fn from(refs: Vec<PathRef>) -> Self {
        Self { refs }
    }
}

impl FromIterator<PathRef> for PathRefs {
    fn from_iter<I: IntoIterator<Item = PathRef>>(iter: I) -> Self {
        Self {
            refs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PathRefs {
    type Item = PathRef;
    type IntoIter = std::vec::IntoIter<PathRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.refs.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathRefs {
    type Item = &'a PathRef;
    type IntoIter = std::slice::Iter<'a, PathRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.refs.iter()
    }
}
