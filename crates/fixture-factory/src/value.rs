//! Attribute values: literals and deferred computations.
//!
//! A factory describes each field either as a literal JSON value or as a
//! deferred function of the partially built fixture and the sequence number.
//! The two are distinguished by an explicit tag, so an object literal is never
//! mistaken for something callable.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BuildError;

/// An untyped fixture: an object whose keys keep their resolution order.
pub type Fixture = Map<String, Value>;

type Resolver = dyn Fn(&Fixture, usize) -> Result<Value, BuildError>;

/// The value bound to one key of an [`AttributeSet`](crate::AttributeSet).
///
/// # Example
///
/// ```
/// use fixture_factory::AttributeValue;
/// use serde_json::json;
///
/// let name = AttributeValue::from("John");
/// let id = AttributeValue::deferred(|_, sequence| sequence);
///
/// assert_eq!(name.as_literal(), Some(&json!("John")));
/// assert!(id.is_deferred());
/// ```
#[derive(Clone)]
pub struct AttributeValue {
    kind: Kind,
}

#[derive(Clone)]
enum Kind {
    Literal(Value),
    Deferred(Rc<Resolver>),
}

impl AttributeValue {
    /// Wraps a literal value.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self {
            kind: Kind::Literal(value.into()),
        }
    }

    /// Wraps a function computed at build time.
    ///
    /// The function receives the fixture as populated so far (only keys that
    /// precede this one in resolution order) and the 1-based sequence number
    /// of the build. Its return value is used as-is.
    #[must_use]
    pub fn deferred<F, V>(resolver: F) -> Self
    where
        F: Fn(&Fixture, usize) -> V + 'static,
        V: Into<Value>,
    {
        Self {
            kind: Kind::Deferred(Rc::new(
                move |fixture: &Fixture, sequence: usize| -> Result<Value, BuildError> {
                    Ok(resolver(fixture, sequence).into())
                },
            )),
        }
    }

    /// Wraps a fallible function computed at build time.
    ///
    /// Use this form when the attribute builds fixtures from another factory,
    /// so failures propagate with `?`.
    ///
    /// # Example
    ///
    /// ```
    /// use fixture_factory::{AttributeValue, BuildError};
    /// use serde_json::Value;
    ///
    /// let email = AttributeValue::try_deferred(|user, _| {
    ///     let name = user
    ///         .get("name")
    ///         .and_then(Value::as_str)
    ///         .ok_or_else(|| BuildError::attribute("email", "name must resolve first"))?;
    ///     Ok(Value::from(format!("{}@email.com", name.to_lowercase())))
    /// });
    /// assert!(email.is_deferred());
    /// ```
    #[must_use]
    pub fn try_deferred<F>(resolver: F) -> Self
    where
        F: Fn(&Fixture, usize) -> Result<Value, BuildError> + 'static,
    {
        Self {
            kind: Kind::Deferred(Rc::new(resolver)),
        }
    }

    /// Serializes any value into a literal.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Conversion`] when the value cannot be represented
    /// as JSON (for example a map with non-string keys).
    pub fn serialized<T>(value: &T) -> Result<Self, BuildError>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_value(value)
            .map(Self::literal)
            .map_err(|e| BuildError::Conversion {
                message: e.to_string(),
            })
    }

    /// Returns `true` when the value is computed at build time.
    #[must_use]
    pub const fn is_deferred(&self) -> bool {
        matches!(self.kind, Kind::Deferred(_))
    }

    /// Returns the literal value, or `None` for deferred attributes.
    #[must_use]
    pub const fn as_literal(&self) -> Option<&Value> {
        match &self.kind {
            Kind::Literal(value) => Some(value),
            Kind::Deferred(_) => None,
        }
    }

    /// Produces the final value for one build.
    pub(crate) fn resolve(self, partial: &Fixture, sequence: usize) -> Result<Value, BuildError> {
        match self.kind {
            Kind::Literal(value) => Ok(value),
            Kind::Deferred(resolver) => resolver(partial, sequence),
        }
    }
}

impl fmt::Debug for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Kind::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    Self::literal(value)
                }
            }
        )*
    };
}

literal_from!(
    Value,
    Fixture,
    Vec<Fixture>,
    Vec<Value>,
    String,
    &str,
    bool,
    i32,
    i64,
    u32,
    u64,
    usize,
    f64,
);

#[cfg(test)]
mod tests {
    //! Covers literal conversion and deferred resolution.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::string(AttributeValue::from("John"), json!("John"))]
    #[case::integer(AttributeValue::from(42_i64), json!(42))]
    #[case::boolean(AttributeValue::from(true), json!(true))]
    #[case::null(AttributeValue::from(Value::Null), Value::Null)]
    #[case::array(AttributeValue::from(Vec::<Value>::new()), json!([]))]
    fn literals_resolve_to_themselves(#[case] value: AttributeValue, #[case] expected: Value) {
        let resolved = value.resolve(&Fixture::new(), 1).expect("literal resolves");
        assert_eq!(resolved, expected);
    }

    #[test]
    fn deferred_receives_sequence() {
        let value = AttributeValue::deferred(|_, sequence| format!("email{sequence}@email.com"));
        let resolved = value.resolve(&Fixture::new(), 3).expect("deferred resolves");
        assert_eq!(resolved, json!("email3@email.com"));
    }

    #[test]
    fn deferred_receives_partial_fixture() {
        let mut partial = Fixture::new();
        partial.insert("name".to_owned(), json!("John"));
        let value = AttributeValue::deferred(|fixture, _| fixture.get("name").cloned());

        let resolved = value.resolve(&partial, 1).expect("deferred resolves");
        assert_eq!(resolved, json!("John"));
    }

    #[test]
    fn deferred_result_is_not_resolved_again() {
        let value = AttributeValue::deferred(|_, _| json!({"nested": "object"}));
        let resolved = value.resolve(&Fixture::new(), 1).expect("deferred resolves");
        assert_eq!(resolved, json!({"nested": "object"}));
    }

    #[test]
    fn try_deferred_propagates_errors() {
        let value = AttributeValue::try_deferred(|_, _| Err(BuildError::attribute("id", "boom")));
        let result = value.resolve(&Fixture::new(), 1);
        assert_eq!(result, Err(BuildError::attribute("id", "boom")));
    }

    #[test]
    fn serialized_wraps_serializable_values() {
        #[derive(Serialize)]
        struct Role {
            name: &'static str,
        }

        let value = AttributeValue::serialized(&Role { name: "admin" }).expect("serializes");
        assert_eq!(value.as_literal(), Some(&json!({"name": "admin"})));
    }

    #[test]
    fn debug_hides_deferred_closures() {
        let literal = AttributeValue::from(1_i64);
        let deferred = AttributeValue::deferred(|_, sequence| sequence);

        assert_eq!(format!("{literal:?}"), "Literal(Number(1))");
        assert_eq!(format!("{deferred:?}"), "Deferred(..)");
    }
}
