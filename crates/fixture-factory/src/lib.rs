//! Declarative, partially randomised test fixture factories.
//!
//! A factory is defined once as a function from a [`RandomContext`] to an
//! ordered [`AttributeSet`]. Callers then request one fixture or a batch,
//! optionally overriding attributes, including fields of nested objects via
//! dotted keys such as `"role.name"`.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Literal and deferred attributes, where a deferred attribute is computed
//!   from the fields resolved before it and a per-fixture sequence number
//! - Overrides that replace defaults in place or append new keys
//! - Dotted keys that write into nested objects without touching siblings
//! - Batches sharing one random context, numbered from 1
//! - Typed output through `serde`, reproducible seeding and a name-keyed
//!   registry
//!
//! # Example
//!
//! ```
//! use fixture_factory::{AttributeValue, Factory, attributes};
//! use serde_json::{Value, json};
//!
//! let users = Factory::new(|context| {
//!     attributes! {
//!         "id" => AttributeValue::deferred(|_, sequence| sequence),
//!         "name" => "John",
//!         "email" => AttributeValue::deferred(|user, _| {
//!             let name = user.get("name").and_then(Value::as_str).unwrap_or_default();
//!             format!("{}@email.com", name.to_lowercase())
//!         }),
//!         "apiKey" => context.hash(24),
//!     }
//! });
//!
//! let user = users
//!     .create_with(&attributes! { "name" => "Jane" })
//!     .expect("user builds");
//!
//! assert_eq!(user.get("email"), Some(&json!("jane@email.com")));
//! assert_eq!(user.get("apiKey").and_then(Value::as_str).map(str::len), Some(24));
//! ```

mod attributes;
mod builder;
mod context;
mod error;
mod factory;
mod registry;
mod settings;
mod value;

pub use attributes::{AttributeSet, PATH_SEPARATOR};
pub use builder::resolve;
pub use context::{ContextSource, RandomContext};
pub use error::{BuildError, RegistryError, SettingsError};
pub use factory::{Factory, create_factory};
pub use registry::{FactoryRegistry, Generated, Request};
pub use settings::FactorySettings;
pub use value::{AttributeValue, Fixture};
