//! Factory handles.
//!
//! A [`Factory`] owns a definition and hands out fixtures. It manages the
//! lifetime of random contexts (one per `create`, one shared per
//! `create_many`) and assigns sequence numbers.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::attributes::AttributeSet;
use crate::builder::{self, Definition};
use crate::context::{ContextSource, RandomContext};
use crate::error::BuildError;
use crate::settings::FactorySettings;
use crate::value::Fixture;

/// Sequence number used by single builds and the first build of a batch.
const FIRST_SEQUENCE: usize = 1;

/// A reusable fixture factory.
///
/// `T` is the output type; it defaults to the untyped [`Fixture`], which is
/// returned as built. Any other `DeserializeOwned` type can be requested with
/// [`Factory::typed`] and is converted from the fixture through `serde_json`.
///
/// Factories are cheap to clone and can be shared across threads. Every
/// build calls the definition afresh, so defaults drawn from the random
/// context differ between fixtures.
///
/// # Example
///
/// ```
/// use fixture_factory::{AttributeValue, Factory, attributes};
/// use serde_json::json;
///
/// let users = Factory::new(|_| {
///     attributes! {
///         "id" => AttributeValue::deferred(|_, sequence| sequence),
///         "email" => AttributeValue::deferred(|_, sequence| format!("email{sequence}@email.com")),
///     }
/// });
///
/// let batch = users.create_many(2).expect("fixtures build");
/// assert_eq!(batch[1].get("id"), Some(&json!(2)));
/// assert_eq!(batch[1].get("email"), Some(&json!("email2@email.com")));
/// ```
pub struct Factory<T = Fixture> {
    definition: Arc<Definition>,
    source: ContextSource,
    output: PhantomData<fn() -> T>,
}

impl Factory {
    /// Creates a factory from an infallible definition.
    #[must_use]
    pub fn new<F>(definition: F) -> Self
    where
        F: Fn(&mut RandomContext) -> AttributeSet + Send + Sync + 'static,
    {
        Self::try_new(move |context| Ok(definition(context)))
    }

    /// Creates a factory from a fallible definition.
    ///
    /// Useful when defaults embed fixtures from other factories, whose
    /// failures can then propagate with `?`.
    #[must_use]
    pub fn try_new<F>(definition: F) -> Self
    where
        F: Fn(&mut RandomContext) -> Result<AttributeSet, BuildError> + Send + Sync + 'static,
    {
        Self {
            definition: Arc::new(definition),
            source: ContextSource::default(),
            output: PhantomData,
        }
    }
}

impl<T> Factory<T> {
    /// Returns a factory producing `U` from the same definition.
    ///
    /// # Example
    ///
    /// ```
    /// use fixture_factory::{Factory, attributes};
    /// use serde::Deserialize;
    ///
    /// #[derive(Debug, Deserialize, PartialEq)]
    /// struct Role {
    ///     name: String,
    /// }
    ///
    /// let roles = Factory::new(|_| attributes! { "name" => "admin" }).typed::<Role>();
    /// let role = roles.create().expect("role builds");
    ///
    /// assert_eq!(role, Role { name: "admin".to_owned() });
    /// ```
    #[must_use]
    pub fn typed<U>(self) -> Factory<U> {
        Factory {
            definition: self.definition,
            source: self.source,
            output: PhantomData,
        }
    }

    /// Selects where random contexts come from.
    #[must_use]
    pub const fn with_context_source(mut self, source: ContextSource) -> Self {
        self.source = source;
        self
    }

    /// Applies loaded settings to this factory.
    #[must_use]
    pub fn with_settings(self, settings: &FactorySettings) -> Self {
        self.with_context_source(settings.context_source())
    }

    /// Returns the configured context source.
    #[must_use]
    pub const fn context_source(&self) -> ContextSource {
        self.source
    }
}

impl<T: DeserializeOwned + 'static> Factory<T> {
    /// Builds one fixture from the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when an attribute cannot be resolved or
    /// assigned, or the fixture does not convert into `T`.
    pub fn create(&self) -> Result<T, BuildError> {
        self.create_single(None)
    }

    /// Builds one fixture with `overrides` merged over the defaults.
    ///
    /// # Errors
    ///
    /// See [`Factory::create`].
    pub fn create_with(&self, overrides: &AttributeSet) -> Result<T, BuildError> {
        self.create_single(Some(overrides))
    }

    /// Builds `count` fixtures from the defaults.
    ///
    /// All fixtures share one random context; the fixture at index `i` is
    /// built with sequence number `i + 1`.
    ///
    /// # Errors
    ///
    /// Returns the first [`BuildError`] encountered; no partial batch is
    /// returned.
    pub fn create_many(&self, count: usize) -> Result<Vec<T>, BuildError> {
        self.create_batch(count, None)
    }

    /// Builds `count` fixtures, applying the same `overrides` to each.
    ///
    /// # Errors
    ///
    /// See [`Factory::create_many`].
    pub fn create_many_with(
        &self,
        count: usize,
        overrides: &AttributeSet,
    ) -> Result<Vec<T>, BuildError> {
        self.create_batch(count, Some(overrides))
    }

    fn create_single(&self, overrides: Option<&AttributeSet>) -> Result<T, BuildError> {
        debug!(
            has_overrides = overrides.is_some(),
            source = ?self.source,
            "creating fixture"
        );
        let mut context = self.source.context();
        self.build_one(&mut context, overrides, FIRST_SEQUENCE)
    }

    fn create_batch(
        &self,
        count: usize,
        overrides: Option<&AttributeSet>,
    ) -> Result<Vec<T>, BuildError> {
        debug!(
            count,
            has_overrides = overrides.is_some(),
            source = ?self.source,
            "creating fixtures"
        );
        let mut context = self.source.context();
        (FIRST_SEQUENCE..)
            .take(count)
            .map(|sequence| self.build_one(&mut context, overrides, sequence))
            .collect()
    }

    fn build_one(
        &self,
        context: &mut RandomContext,
        overrides: Option<&AttributeSet>,
        sequence: usize,
    ) -> Result<T, BuildError> {
        let fixture = builder::build(self.definition.as_ref(), context, overrides, sequence)?;
        into_output(fixture)
    }
}

/// Converts a built fixture into the output type.
///
/// Untyped factories get the fixture back unchanged; other types are
/// deserialized from it.
fn into_output<T: DeserializeOwned + 'static>(fixture: Fixture) -> Result<T, BuildError> {
    let mut slot = Some(fixture);
    if let Some(output) = (&mut slot as &mut dyn Any)
        .downcast_mut::<Option<T>>()
        .and_then(Option::take)
    {
        return Ok(output);
    }
    let value = slot.map_or(Value::Null, Value::Object);
    serde_json::from_value(value).map_err(|e| BuildError::Conversion {
        message: e.to_string(),
    })
}

impl<T> Clone for Factory<T> {
    fn clone(&self) -> Self {
        Self {
            definition: Arc::clone(&self.definition),
            source: self.source,
            output: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Factory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("output", &std::any::type_name::<T>())
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Creates an untyped factory from a definition.
///
/// Shorthand for [`Factory::new`].
///
/// # Example
///
/// ```
/// use fixture_factory::{attributes, create_factory};
/// use serde_json::{Value, json};
///
/// let users = create_factory(|_| attributes! { "id" => 1, "name" => "John" });
/// let user = users.create().expect("user builds");
///
/// assert_eq!(Value::Object(user), json!({"id": 1, "name": "John"}));
/// ```
#[must_use]
pub fn create_factory<F>(definition: F) -> Factory
where
    F: Fn(&mut RandomContext) -> AttributeSet + Send + Sync + 'static,
{
    Factory::new(definition)
}
