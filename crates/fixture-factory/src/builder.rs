//! Attribute resolution.
//!
//! The builder turns a factory definition into one fixture: it invokes the
//! definition, merges overrides over the defaults, then walks the merged set
//! in order. Each deferred attribute sees only the keys resolved before it,
//! and every key is written through a dotted-path walker that creates
//! intermediate objects on demand.

use serde_json::{Map, Value};
use tracing::trace;

use crate::attributes::{AttributeSet, PATH_SEPARATOR};
use crate::context::RandomContext;
use crate::error::BuildError;
use crate::value::Fixture;

/// A factory definition: produces the default attributes for one build.
pub(crate) type Definition =
    dyn Fn(&mut RandomContext) -> Result<AttributeSet, BuildError> + Send + Sync;

/// Builds one fixture from a definition, optional overrides and a sequence
/// number.
pub(crate) fn build(
    definition: &Definition,
    context: &mut RandomContext,
    overrides: Option<&AttributeSet>,
    sequence: usize,
) -> Result<Fixture, BuildError> {
    let mut attributes = definition(context)?;
    if let Some(replacements) = overrides {
        attributes.merge(replacements);
    }
    resolve(attributes, sequence)
}

/// Resolves an already merged attribute set into a fixture.
///
/// Keys are processed strictly in the set's order. Deferred attributes are
/// called with the fixture as populated so far and `sequence`.
///
/// # Errors
///
/// Returns [`BuildError`] when a deferred attribute fails or a key cannot be
/// assigned (see [`BuildError::InvalidPath`]).
///
/// # Example
///
/// ```
/// use fixture_factory::{AttributeValue, attributes, resolve};
/// use serde_json::{Value, json};
///
/// let fixture = resolve(
///     attributes! {
///         "name" => "John",
///         "email" => AttributeValue::deferred(|user, _| {
///             let name = user.get("name").and_then(Value::as_str).unwrap_or_default();
///             format!("{}@email.com", name.to_lowercase())
///         }),
///     },
///     1,
/// )
/// .expect("fixture resolves");
///
/// assert_eq!(Value::Object(fixture), json!({"name": "John", "email": "john@email.com"}));
/// ```
pub fn resolve(attributes: AttributeSet, sequence: usize) -> Result<Fixture, BuildError> {
    let mut output = Fixture::new();
    for (key, value) in attributes {
        let is_deferred = value.is_deferred();
        let resolved = value.resolve(&output, sequence)?;
        trace!(key = %key, sequence, is_deferred, "attribute resolved");
        assign_path(&mut output, &key, resolved)?;
    }
    Ok(output)
}

/// Writes `value` into `output` at the dotted path `key`.
///
/// Missing intermediate segments become empty objects. An intermediate
/// segment holding anything other than an object is an error; the final
/// segment is overwritten unconditionally. Empty segments are ordinary keys.
pub(crate) fn assign_path(output: &mut Fixture, key: &str, value: Value) -> Result<(), BuildError> {
    let Some((parents, leaf)) = key.rsplit_once(PATH_SEPARATOR) else {
        output.insert(key.to_owned(), value);
        return Ok(());
    };

    let mut target = output;
    for segment in parents.split(PATH_SEPARATOR) {
        let slot = target
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()));
        target = match slot {
            Value::Object(nested) => nested,
            other => {
                return Err(BuildError::InvalidPath {
                    key: key.to_owned(),
                    segment: segment.to_owned(),
                    found: describe(other),
                });
            }
        };
    }
    target.insert(leaf.to_owned(), value);
    Ok(())
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
