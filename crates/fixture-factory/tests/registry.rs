//! Integration tests for the name-keyed factory registry.
//!
//! These tests validate lookups by name, single and counted requests, error
//! reporting for unknown names, and interplay with standalone factories.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use fixture_factory::{
    AttributeSet, AttributeValue, BuildError, ContextSource, Factory, FactoryRegistry, Generated,
    RegistryError, Request, attributes,
};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn registry() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    registry
        .register("user", |context| {
            attributes! {
                "id" => AttributeValue::deferred(|_, sequence| sequence),
                "name" => "John",
                "apiKey" => context.hash(24),
            }
        })
        .register("role", |_| attributes! { "name" => "admin" });
    registry
}

#[rstest]
fn builds_one_fixture_with_overrides(registry: FactoryRegistry) {
    let user = registry
        .create("user", attributes! { "name" => "Jane", "active" => true })
        .expect("user builds")
        .into_one()
        .expect("an attribute request yields one fixture");

    assert_eq!(user.get("name"), Some(&json!("Jane")));
    assert_eq!(user.get("active"), Some(&json!(true)));
    assert_eq!(
        user.get("apiKey").and_then(Value::as_str).map(str::len),
        Some(24)
    );
}

#[rstest]
fn builds_a_batch_for_a_count(registry: FactoryRegistry) {
    let users = registry
        .create("user", 3_usize)
        .expect("users build")
        .into_many()
        .expect("a count yields a batch");

    let ids: Vec<Option<&Value>> = users.iter().map(|user| user.get("id")).collect();
    assert_eq!(ids, [Some(&json!(1)), Some(&json!(2)), Some(&json!(3))]);
}

#[rstest]
fn empty_attribute_request_returns_defaults(registry: FactoryRegistry) {
    let generated = registry
        .create("role", Request::Attributes(AttributeSet::new()))
        .expect("role builds");

    assert_eq!(
        generated.into_one().map(Value::Object),
        Some(json!({"name": "admin"}))
    );
}

#[rstest]
fn dotted_keys_apply_to_registry_requests(registry: FactoryRegistry) {
    let role = registry
        .create("role", attributes! { "permissions.orders" => "read" })
        .expect("role builds");

    assert_eq!(
        role,
        Generated::One(
            json!({"name": "admin", "permissions": {"orders": "read"}})
                .as_object()
                .cloned()
                .expect("literal is an object")
        )
    );
}

#[rstest]
fn unknown_factory_is_reported_by_name(registry: FactoryRegistry) {
    let error = registry
        .create("permission", 2_usize)
        .expect_err("permission is not registered");

    assert_eq!(
        error,
        RegistryError::UnknownFactory {
            name: "permission".to_owned()
        }
    );
    assert_eq!(
        error.to_string(),
        "factory 'permission' does not exist; did you forget to register it?"
    );
}

#[rstest]
fn build_errors_are_surfaced(registry: FactoryRegistry) {
    let result = registry.create("role", attributes! { "name.first" => "Ada" });

    assert_eq!(
        result,
        Err(RegistryError::Build(BuildError::InvalidPath {
            key: "name.first".to_owned(),
            segment: "name".to_owned(),
            found: "a string",
        }))
    );
}

#[test]
fn registers_preconfigured_factories() {
    let tokens = Factory::new(|context| attributes! { "token" => context.hash(16) })
        .with_context_source(ContextSource::Seeded(99));
    let mut registry = FactoryRegistry::new();
    registry.register_factory("token", tokens.clone());

    let from_registry = registry
        .create("token", AttributeSet::new())
        .expect("token builds")
        .into_one();
    let direct = tokens.create().expect("token builds");

    assert_eq!(from_registry, Some(direct));
}

#[test]
fn registry_factories_can_nest_other_factories() {
    let roles = Factory::new(|_| attributes! { "name" => "admin" });
    let mut registry = FactoryRegistry::new();
    registry.register_factory(
        "user",
        Factory::try_new(move |_| {
            Ok(attributes! {
                "name" => "John",
                "role" => roles.create()?,
            })
        }),
    );

    let user = registry
        .create("user", attributes! { "role.name" => "editor" })
        .expect("user builds")
        .into_one()
        .map(Value::Object);

    assert_eq!(
        user,
        Some(json!({"name": "John", "role": {"name": "editor"}}))
    );
}
