use std::collections::BTreeMap;

use json_path_ref::{
    create_index, create_property, create_root, Configuration, JsonProvider, Lookup,
    NormalizedPath, PathRefError, PathRefs, PropertyKey, ProviderError,
};

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Null,
    Int(i64),
    List(Vec<Node>),
    Map(BTreeMap<String, Node>),
}

fn map(entries: Vec<(&str, Node)>) -> Node {
    Node::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

/// Provider whose array writes grow the list instead of failing.
#[derive(Debug, Default)]
struct GrowingProvider;

fn lookup<T>(found: Option<(T, bool)>) -> Lookup<T> {
    match found {
        None => Lookup::Undefined,
        Some((_, true)) => Lookup::Null,
        Some((v, false)) => Lookup::Present(v),
    }
}

impl JsonProvider for GrowingProvider {
    type Value = Node;

    fn is_array(&self, value: &Node) -> bool {
        matches!(value, Node::List(_))
    }

    fn is_map(&self, value: &Node) -> bool {
        matches!(value, Node::Map(_))
    }

    fn get_array_index<'v>(&self, parent: &'v Node, index: usize) -> Lookup<&'v Node> {
        match parent {
            Node::List(items) => lookup(items.get(index).map(|v| (v, *v == Node::Null))),
            _ => Lookup::Undefined,
        }
    }

    fn get_array_index_mut<'v>(&self, parent: &'v mut Node, index: usize) -> Lookup<&'v mut Node> {
        match parent {
            Node::List(items) => lookup(items.get_mut(index).map(|v| {
                let is_null = *v == Node::Null;
                (v, is_null)
            })),
            _ => Lookup::Undefined,
        }
    }

    fn get_map_value<'v>(&self, parent: &'v Node, key: &str) -> Lookup<&'v Node> {
        match parent {
            Node::Map(entries) => lookup(entries.get(key).map(|v| (v, *v == Node::Null))),
            _ => Lookup::Undefined,
        }
    }

    fn get_map_value_mut<'v>(&self, parent: &'v mut Node, key: &str) -> Lookup<&'v mut Node> {
        match parent {
            Node::Map(entries) => lookup(entries.get_mut(key).map(|v| {
                let is_null = *v == Node::Null;
                (v, is_null)
            })),
            _ => Lookup::Undefined,
        }
    }

    fn set_array_index(
        &self,
        parent: &mut Node,
        index: usize,
        value: Node,
    ) -> Result<(), ProviderError> {
        let Node::List(items) = parent else {
            return Err(ProviderError::NotAnArray);
        };
        if index >= items.len() {
            items.resize(index + 1, Node::Null);
        }
        items[index] = value;
        Ok(())
    }

    fn set_property(
        &self,
        parent: &mut Node,
        key: Option<&str>,
        value: Node,
    ) -> Result<(), ProviderError> {
        match (parent, key) {
            (Node::List(items), None) => {
                items.push(value);
                Ok(())
            }
            (Node::Map(entries), Some(key)) => {
                entries.insert(key.to_string(), value);
                Ok(())
            }
            (_, None) => Err(ProviderError::NotAnArray),
            (_, Some(_)) => Err(ProviderError::NotAMap),
        }
    }

    fn remove_property(
        &self,
        parent: &mut Node,
        key: PropertyKey<'_>,
    ) -> Result<(), ProviderError> {
        match (parent, key) {
            (Node::List(items), PropertyKey::Index(index)) if index < items.len() => {
                items.remove(index);
                Ok(())
            }
            (Node::List(items), PropertyKey::Index(index)) => {
                Err(ProviderError::IndexOutOfBounds { index, len: items.len() })
            }
            (Node::Map(entries), PropertyKey::Name(key)) => {
                entries.remove(key);
                Ok(())
            }
            (_, PropertyKey::Index(_)) => Err(ProviderError::NotAnArray),
            (_, PropertyKey::Name(_)) => Err(ProviderError::NotAMap),
        }
    }
}

fn conf() -> Configuration<GrowingProvider> {
    Configuration::builder().json_provider(GrowingProvider).build()
}

#[test]
fn provider_decides_out_of_range_policy() {
    let mut doc = map(vec![("a", Node::List(vec![Node::Int(1)]))]);
    create_index(NormalizedPath::root().key("a"), 2)
        .set(&mut doc, Node::Int(3), &conf())
        .unwrap();
    assert_eq!(
        doc,
        map(vec![("a", Node::List(vec![Node::Int(1), Node::Null, Node::Int(3)]))])
    );
}

#[test]
fn null_target_is_skipped_through_custom_provider() {
    let mut doc = map(vec![("n", Node::Null), ("l", Node::List(vec![]))]);
    let before = doc.clone();
    create_property(NormalizedPath::root(), "n")
        .add(&mut doc, Node::Int(1), &conf())
        .unwrap();
    assert_eq!(doc, before);

    create_property(NormalizedPath::root(), "l")
        .add(&mut doc, Node::Int(1), &conf())
        .unwrap();
    assert_eq!(
        doc,
        map(vec![("n", Node::Null), ("l", Node::List(vec![Node::Int(1)]))])
    );
}

#[test]
fn bulk_delete_and_root_rules_through_custom_provider() {
    let mut doc = Node::List((0..5).map(Node::Int).collect());
    let mut refs: PathRefs = [1, 3, 4]
        .into_iter()
        .map(|i| create_index(NormalizedPath::root(), i))
        .collect();
    refs.delete(&mut doc, &conf()).unwrap();
    assert_eq!(doc, Node::List(vec![Node::Int(0), Node::Int(2)]));

    let err = create_root().put(&mut doc, "k", Node::Int(1), &conf()).unwrap_err();
    assert!(matches!(err, PathRefError::InvalidModification(_)));
}
