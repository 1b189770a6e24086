// crates/wirecheck-core/tests/proptest_matching.rs
// ============================================================================
// Module: Matching and Validation Property-Based Tests
// Description: Property tests for template matching, ranking, and literal grammar.
// Purpose: Detect panics and invariant breaks across wide input ranges.
// ============================================================================

//! Property-based tests for matching and validation invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::str::FromStr;

use bigdecimal::BigDecimal;
use proptest::prelude::*;
use wirecheck_core::ApiDefinition;
use wirecheck_core::ContractModel;
use wirecheck_core::NoopDiagnosticsSink;
use wirecheck_core::Parameter;
use wirecheck_core::ParameterContext;
use wirecheck_core::ParameterScope;
use wirecheck_core::ParameterType;
use wirecheck_core::ParameterValidator;
use wirecheck_core::ResourceDefinition;
use wirecheck_core::Values;
use wirecheck_core::Violations;
use wirecheck_core::is_integer_literal;
use wirecheck_core::is_number_literal;
use wirecheck_core::match_template;
use wirecheck_core::resolve;

/// One template segment: `Some(name)` is a placeholder, `None` a literal.
fn segments_strategy() -> impl Strategy<Value = Vec<(Option<String>, String)>> {
    prop::collection::vec(
        (prop::option::of("[a-z]{1,6}"), "[a-z0-9]{1,8}"),
        1 .. 6,
    )
}

fn validate_query(declared: &[Parameter], values: &Values) -> Vec<String> {
    let mut violations = Violations::new();
    let context = ParameterContext::new(ParameterScope::Query);
    ParameterValidator::new(&mut violations, &NoopDiagnosticsSink).validate_parameters(
        &context,
        declared,
        values,
    );
    violations.messages().into_iter().map(ToString::to_string).collect()
}

proptest! {
    #[test]
    fn complete_match_binds_every_placeholder(segments in segments_strategy()) {
        let mut template = String::new();
        let mut path = String::new();
        let mut placeholders = 0;
        for (index, (placeholder, text)) in segments.iter().enumerate() {
            template.push('/');
            path.push('/');
            path.push_str(text);
            match placeholder {
                Some(name) => {
                    template.push_str(&format!("{{{name}{index}}}"));
                    placeholders += 1;
                }
                None => template.push_str(text),
            }
        }
        let outcome = match_template(&template, &path);
        prop_assert!(outcome.is_complete_match());
        prop_assert_eq!(outcome.suffix(), "");
        prop_assert_eq!(outcome.variable_count(), placeholders);

        let extended = format!("{path}/tail");
        let partial = match_template(&template, &extended);
        prop_assert!(partial.is_match());
        prop_assert!(!partial.is_complete_match());
        prop_assert_eq!(partial.suffix(), "/tail");
    }

    #[test]
    fn literal_sibling_always_outranks_placeholder(literal in "[a-z]{1,10}") {
        let definition = ApiDefinition::new().with_resource(
            ResourceDefinition::new("/items")
                .with_child(ResourceDefinition::new("/{id}"))
                .with_child(ResourceDefinition::new(format!("/{literal}"))),
        );
        let contract = ContractModel::from_definition(definition).unwrap();
        let resolved = resolve(&contract, &format!("/items/{literal}")).unwrap();
        prop_assert_eq!(contract.full_uri(resolved.resource), format!("/items/{literal}"));
        prop_assert!(resolved.variables.is_empty());
    }

    #[test]
    fn rendered_integers_follow_the_grammar(value in any::<i64>()) {
        let rendered = value.to_string();
        prop_assert!(is_integer_literal(&rendered));
        prop_assert!(is_number_literal(&rendered));
        prop_assert_eq!(BigDecimal::from_str(&rendered).unwrap(), BigDecimal::from(value));
    }

    #[test]
    fn leading_zeros_are_never_integers(digits in "[0-9]{1,12}") {
        let padded = format!("0{digits}");
        prop_assert!(!is_integer_literal(&padded));
        let negative = format!("-{padded}");
        prop_assert!(!is_integer_literal(&negative));
    }

    #[test]
    fn validation_never_panics_and_is_idempotent(
        value in ".{0,24}",
        kind in prop_oneof![
            Just(ParameterType::Boolean),
            Just(ParameterType::Date),
            Just(ParameterType::Integer),
            Just(ParameterType::Number),
            Just(ParameterType::String),
        ],
    ) {
        let declared = [Parameter::new("p", kind)
            .with_minimum(-5)
            .with_maximum(5)
            .with_min_length(2)
            .with_max_length(10)
            .with_pattern("/^[a-z]+$/i")];
        let values: Values = [("p", value.as_str()), ("q", value.as_str())].into_iter().collect();
        let first = validate_query(&declared, &values);
        let second = validate_query(&declared, &values);
        prop_assert_eq!(first, second);
    }
}
