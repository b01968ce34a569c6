//! [`JsonProvider`] for `serde_json::Value`.

use serde_json::Value;

use super::{JsonProvider, Lookup, PropertyKey};
use crate::error::ProviderError;

/// Provider over [`serde_json::Value`] documents.
///
/// Array writes fail fast: setting or removing an index at or past the end
/// of an array returns [`ProviderError::IndexOutOfBounds`] instead of
/// growing the array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerdeJsonProvider;

fn lookup<T>(found: Option<(T, bool)>) -> Lookup<T> {
    match found {
        None => Lookup::Undefined,
        Some((_, true)) => Lookup::Null,
        Some((value, false)) => Lookup::Present(value),
    }
}

impl JsonProvider for SerdeJsonProvider {
    type Value = Value;

    fn is_array(&self, value: &Value) -> bool {
        value.is_array()
    }

    fn is_map(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn get_array_index<'v>(&self, parent: &'v Value, index: usize) -> Lookup<&'v Value> {
        lookup(parent.as_array().and_then(|arr| arr.get(index)).map(|v| (v, v.is_null())))
    }

    fn get_array_index_mut<'v>(
        &self,
        parent: &'v mut Value,
        index: usize,
    ) -> Lookup<&'v mut Value> {
        lookup(
            parent
                .as_array_mut()
                .and_then(|arr| arr.get_mut(index))
                .map(|v| {
                    let is_null = v.is_null();
                    (v, is_null)
                }),
        )
    }

    fn get_map_value<'v>(&self, parent: &'v Value, key: &str) -> Lookup<&'v Value> {
        lookup(parent.as_object().and_then(|map| map.get(key)).map(|v| (v, v.is_null())))
    }

    fn get_map_value_mut<'v>(&self, parent: &'v mut Value, key: &str) -> Lookup<&'v mut Value> {
        lookup(
            parent
                .as_object_mut()
                .and_then(|map| map.get_mut(key))
                .map(|v| {
                    let is_null = v.is_null();
                    (v, is_null)
                }),
        )
    }

    fn set_array_index(
        &self,
        parent: &mut Value,
        index: usize,
        value: Value,
    ) -> Result<(), ProviderError> {
        let arr = parent.as_array_mut().ok_or(ProviderError::NotAnArray)?;
        let len = arr.len();
        let slot = arr
            .get_mut(index)
            .ok_or(ProviderError::IndexOutOfBounds { index, len })?;
        log::trace!("set [{}]", index);
        *slot = value;
        Ok(())
    }

    fn set_property(
        &self,
        parent: &mut Value,
        key: Option<&str>,
        value: Value,
    ) -> Result<(), ProviderError> {
        match (parent, key) {
            (Value::Array(arr), None) => {
                log::trace!("append at [{}]", arr.len());
                arr.push(value);
                Ok(())
            }
            (Value::Object(map), Some(key)) => {
                log::trace!("set ['{}']", key);
                map.insert(key.to_string(), value);
                Ok(())
            }
            (_, None) => Err(ProviderError::NotAnArray),
            (_, Some(_)) => Err(ProviderError::NotAMap),
        }
    }

    fn remove_property(
        &self,
        parent: &mut Value,
        key: PropertyKey<'_>,
    ) -> Result<(), ProviderError> {
        match (parent, key) {
            (Value::Array(arr), PropertyKey::Index(index)) => {
                if index >= arr.len() {
                    return Err(ProviderError::IndexOutOfBounds { index, len: arr.len() });
                }
                log::trace!("remove [{}]", index);
                arr.remove(index);
                Ok(())
            }
            (Value::Object(map), PropertyKey::Name(key)) => {
                log::trace!("remove ['{}']", key);
                map.remove(key);
                Ok(())
            }
            (_, PropertyKey::Index(_)) => Err(ProviderError::NotAnArray),
            (_, PropertyKey::Name(_)) => Err(ProviderError::NotAMap),
        }
    }
}
