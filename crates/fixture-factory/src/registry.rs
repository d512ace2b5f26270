//! Name-keyed factory registry.
//!
//! This module provides the older calling convention where factories are
//! registered under string names and requested by name, passing either an
//! override set or a count. Building is delegated to [`Factory`], so ordering,
//! deferred attributes and dotted keys behave exactly as they do there.

use std::collections::BTreeMap;

use tracing::debug;

use crate::attributes::AttributeSet;
use crate::context::RandomContext;
use crate::error::RegistryError;
use crate::factory::Factory;
use crate::value::Fixture;

/// What to build from a registered factory.
#[derive(Debug, Clone)]
pub enum Request {
    /// Build one fixture with these overrides.
    Attributes(AttributeSet),
    /// Build this many fixtures from the defaults.
    Count(usize),
}

impl From<AttributeSet> for Request {
    fn from(attributes: AttributeSet) -> Self {
        Self::Attributes(attributes)
    }
}

impl From<usize> for Request {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

/// Fixtures produced for a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Generated {
    /// A single fixture, produced for [`Request::Attributes`].
    One(Fixture),
    /// A batch of fixtures, produced for [`Request::Count`].
    Many(Vec<Fixture>),
}

impl Generated {
    /// Returns the single fixture, or `None` for a batch.
    #[must_use]
    pub fn into_one(self) -> Option<Fixture> {
        match self {
            Self::One(fixture) => Some(fixture),
            Self::Many(_) => None,
        }
    }

    /// Returns the batch, or `None` for a single fixture.
    #[must_use]
    pub fn into_many(self) -> Option<Vec<Fixture>> {
        match self {
            Self::One(_) => None,
            Self::Many(fixtures) => Some(fixtures),
        }
    }
}

/// Factories registered under string names.
///
/// # Example
///
/// ```
/// use fixture_factory::{FactoryRegistry, attributes};
///
/// let mut registry = FactoryRegistry::new();
/// registry.register("user", |_| attributes! { "name" => "John" });
///
/// let users = registry
///     .create("user", 3_usize)
///     .expect("user factory is registered")
///     .into_many()
///     .expect("a count yields a batch");
/// assert_eq!(users.len(), 3);
///
/// assert!(registry.create("role", 1_usize).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FactoryRegistry {
    factories: BTreeMap<String, Factory>,
}

impl FactoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registers a definition under `name`, replacing any previous factory.
    pub fn register<F>(&mut self, name: impl Into<String>, definition: F) -> &mut Self
    where
        F: Fn(&mut RandomContext) -> AttributeSet + Send + Sync + 'static,
    {
        self.register_factory(name, Factory::new(definition))
    }

    /// Registers an existing factory under `name`, replacing any previous one.
    pub fn register_factory(&mut self, name: impl Into<String>, factory: Factory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    /// Returns `true` when a factory is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Iterates over registered names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Builds fixtures from the factory registered under `name`.
    ///
    /// An attribute request builds one fixture with those overrides; a count
    /// builds that many fixtures sharing one random context, with sequence
    /// numbers starting at 1.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownFactory`] when nothing is registered
    /// under `name`, and [`RegistryError::Build`] when building fails.
    pub fn create(
        &self,
        name: &str,
        request: impl Into<Request>,
    ) -> Result<Generated, RegistryError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| RegistryError::UnknownFactory {
                name: name.to_owned(),
            })?;
        debug!(factory = name, "registry lookup succeeded");

        match request.into() {
            Request::Attributes(overrides) => Ok(Generated::One(factory.create_with(&overrides)?)),
            Request::Count(count) => Ok(Generated::Many(factory.create_many(count)?)),
        }
    }
}
