//! Resolved JSONPath references.
//!
//! A JSONPath evaluator locates zero or more targets in a document. This
//! crate turns each matched location into a [`PathRef`] that can replace,
//! delete, append to, or put a key into its target without parsing the path
//! again. Documents are read and written through a [`JsonProvider`]; the
//! default provider works on [`serde_json::Value`].
//!
//! # Example
//!
//! ```
//! use json_path_ref::{create_index, Configuration, NormalizedPath, PathRefs};
//! use serde_json::json;
//!
//! let conf: Configuration = Configuration::default();
//! let mut doc = json!({"a": [10, 20, 30]});
//!
//! // References for `$.a[0,2]`.
//! let a = NormalizedPath::root().key("a");
//! let mut refs: PathRefs = vec![create_index(a.clone(), 0), create_index(a, 2)].into();
//!
//! // Higher indices are deleted first, so index 0 still means 10.
//! refs.delete(&mut doc, &conf).unwrap();
//! assert_eq!(doc, json!({"a": [20]}));
//! ```

mod error;
pub use error::{PathRefError, ProviderError};

mod types;
pub use types::{Accessor, NormalizedPath, PathComponent, MULTI_PROPERTY_SEPARATOR};

pub mod provider;
pub use provider::{JsonProvider, Lookup, PropertyKey, SerdeJsonProvider};

mod config;
pub use config::{Configuration, ConfigurationBuilder};

mod path_ref;
pub use path_ref::{
    create_index, create_multi_property, create_property, create_root, ArrayIndexRef,
    ObjectMultiPropertyRef, ObjectPropertyRef, PathRef,
};

mod batch;
pub use batch::{Operation, PathRefs};
