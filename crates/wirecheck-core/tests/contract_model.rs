// crates/wirecheck-core/tests/contract_model.rs
// ============================================================================
// Module: Contract Model Tests
// Description: Contract definition parsing and arena construction.
// Purpose: Ensure malformed contracts are rejected before any traffic is checked.
// ============================================================================

//! Contract model construction tests.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use wirecheck_core::ApiDefinition;
use wirecheck_core::ContractModel;
use wirecheck_core::DefinitionError;
use wirecheck_core::Method;
use wirecheck_core::ModelError;
use wirecheck_core::Parameter;
use wirecheck_core::ParameterType;
use wirecheck_core::ResourceDefinition;
use wirecheck_core::parameter_by_name;
use wirecheck_core::parameters_by_name;

#[test]
fn json_definition_builds_linked_arena() {
    let contract = ContractModel::from_json(
        r#"{
            "title": "Library",
            "version": "v2",
            "resources": [{
                "relativeUri": "/books",
                "displayName": "Books",
                "resources": [{ "relativeUri": "/{isbn}", "methods": [{ "method": "GET" }] }]
            }]
        }"#,
    )
    .unwrap();
    assert_eq!(contract.title(), Some("Library"));
    assert_eq!(contract.version(), Some("v2"));
    assert_eq!(contract.resource_count(), 2);

    let root = contract.roots()[0];
    assert_eq!(contract.resource(root).unwrap().display_name(), Some("Books"));
    let child = contract.children(root)[0];
    assert_eq!(contract.parent(child), Some(root));
    assert_eq!(contract.parent(root), None);
    assert_eq!(contract.full_uri(child), "/books/{isbn}");
    let chain: Vec<_> = contract.ancestors(child).map(|(id, _)| id).collect();
    assert_eq!(chain, vec![child, root]);
    assert!(contract.method(child, "get").is_some());
    assert!(contract.method(root, "get").is_none());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = ContractModel::from_json(r#"{ "resources": [], "securedBy": [] }"#).unwrap_err();
    assert!(matches!(err, DefinitionError::Parse(_)), "{err}");
}

#[test]
fn empty_relative_uri_is_rejected() {
    let definition = ApiDefinition::new()
        .with_resource(ResourceDefinition::new("/a").with_child(ResourceDefinition::new("")));
    let err = ContractModel::from_definition(definition).unwrap_err();
    assert_eq!(
        err,
        ModelError::EmptyRelativeUri {
            parent: "/a".to_string(),
        }
    );
}

#[test]
fn duplicate_query_parameter_is_rejected() {
    let definition = ApiDefinition::new().with_resource(
        ResourceDefinition::new("/search").with_method(
            Method::new("get")
                .with_query_parameter(Parameter::new("q", ParameterType::String))
                .with_query_parameter(Parameter::new("q", ParameterType::Integer)),
        ),
    );
    let err = ContractModel::from_definition(definition).unwrap_err();
    assert!(matches!(err, ModelError::DuplicateParameter { ref name, .. } if name == "q"), "{err}");
}

#[test]
fn inverted_bounds_are_rejected() {
    let definition = ApiDefinition::new().with_base_uri_parameter(
        Parameter::new("port", ParameterType::Integer).with_minimum(10).with_maximum(1),
    );
    let err = ContractModel::from_definition(definition).unwrap_err();
    assert!(matches!(err, ModelError::InvalidBounds { .. }), "{err}");

    let definition = ApiDefinition::new().with_base_uri_parameter(
        Parameter::new("name", ParameterType::String).with_min_length(5).with_max_length(2),
    );
    assert!(ContractModel::from_definition(definition).is_err());
}

#[test]
fn unique_lookup_flags_ambiguous_names() {
    let parameters = vec![
        Parameter::new("id", ParameterType::Integer),
        Parameter::new("id", ParameterType::String),
        Parameter::new("name", ParameterType::String),
    ];
    assert_eq!(parameters_by_name(&parameters, "id").len(), 2);
    assert_eq!(
        parameter_by_name(&parameters, "id").unwrap_err(),
        ModelError::AmbiguousParameter("id".to_string())
    );
    let name = parameter_by_name(&parameters, "name").unwrap().unwrap();
    assert_eq!(name.param_type, ParameterType::String);
    assert!(parameter_by_name(&parameters, "missing").unwrap().is_none());
}

#[test]
fn parameter_json_uses_camel_case_keys() {
    let parameter: Parameter = serde_json::from_str(
        r#"{ "name": "q", "type": "string", "minLength": 1, "maxLength": 8, "enum": ["a"], "required": true }"#,
    )
    .unwrap();
    assert_eq!(parameter.min_length, Some(1));
    assert_eq!(parameter.max_length, Some(8));
    assert_eq!(parameter.enumeration, Some(vec!["a".to_string()]));
    assert!(parameter.required);
    assert!(!parameter.repeat);
}
