//! Serialization of the resolved model: metadata pipelines persist
//! `PropertyType` values, so the serde shape is part of the contract.

use jmstype::{PropertyType, TypeResolver};

/// Test: a resolved type survives a serde round trip structurally
/// unchanged.
#[test]
fn test_round_trip_preserves_structure() {
    let resolver = TypeResolver::default();
    for raw in [
        "",
        "string",
        "App\\Entity\\User",
        "array",
        "array<int, App\\Entity\\User>",
        "ArrayCollection<App\\Entity\\User>",
        "DateTime<'Y-m-d', 'UTC', ['Y-m-d', 'Y/m/d']>",
    ] {
        let resolved = resolver.resolve(raw).unwrap();
        let json = serde_json::to_string(&resolved).unwrap();
        let back: PropertyType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, resolved, "Round trip changed `{raw}`. Got: {json}");
    }
}

/// Test: the serialized shape is the tagged-variant form downstream
/// tooling matches on.
#[test]
fn test_serialized_shape() {
    let resolved = TypeResolver::default().resolve("array<string>").unwrap();
    let json = serde_json::to_value(&resolved).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "Iterable": {
                "element_type": { "Primitive": { "name": "string", "nullable": false } },
                "keyed": false,
                "nullable": true,
                "collection_class": null,
            }
        })
    );
}
