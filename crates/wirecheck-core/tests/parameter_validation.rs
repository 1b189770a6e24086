// crates/wirecheck-core/tests/parameter_validation.rs
// ============================================================================
// Module: Parameter Validation Tests
// Description: Presence, multiplicity, type, and constraint checks.
// Purpose: Pin violation keys, payloads, and diagnostics for observed values.
// ============================================================================

//! Parameter validator tests.

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

use bigdecimal::BigDecimal;
use wirecheck_core::DiagnosticKind;
use wirecheck_core::MemoryDiagnosticsSink;
use wirecheck_core::Parameter;
use wirecheck_core::ParameterContext;
use wirecheck_core::ParameterScope;
use wirecheck_core::ParameterType;
use wirecheck_core::ParameterValidator;
use wirecheck_core::ParameterViolationKind;
use wirecheck_core::Values;
use wirecheck_core::Violations;

struct Outcome {
    violations: Violations,
    diagnostics: Vec<DiagnosticKind>,
}

fn run(scope: ParameterScope, declared: &[Parameter], values: &Values, accept: bool) -> Outcome {
    let sink = MemoryDiagnosticsSink::new();
    let mut violations = Violations::new();
    let context = ParameterContext::new(scope).at("GET /users");
    ParameterValidator::new(&mut violations, &sink).accept_undefined(accept).validate_parameters(
        &context,
        declared,
        values,
    );
    Outcome {
        violations,
        diagnostics: sink.kinds(),
    }
}

fn query(declared: &[Parameter], pairs: &[(&str, &str)]) -> Outcome {
    let values: Values = pairs.iter().copied().collect();
    run(ParameterScope::Query, declared, &values, false)
}

fn keys_for(parameter: Parameter, value: &str) -> Vec<&'static str> {
    let name = parameter.name.clone();
    query(&[parameter], &[(name.as_str(), value)]).violations.keys()
}

// ============================================================================
// SECTION: Presence and Multiplicity
// ============================================================================

#[test]
fn missing_required_parameter_is_reported_once() {
    let declared = [Parameter::new("limit", ParameterType::Integer).required()];
    let outcome = query(&declared, &[]);
    assert_eq!(outcome.violations.keys(), vec!["required.missing"]);
    let violation = outcome.violations.records()[0].violation().as_parameter().unwrap();
    assert_eq!(violation.name, "limit");
    assert_eq!(violation.value, None);
}

#[test]
fn missing_required_parameters_follow_declaration_order() {
    let declared = [
        Parameter::new("b", ParameterType::String).required(),
        Parameter::new("a", ParameterType::String).required(),
        Parameter::new("c", ParameterType::String),
    ];
    let outcome = query(&declared, &[]);
    let names: Vec<String> = outcome
        .violations
        .iter()
        .map(|record| record.violation().as_parameter().unwrap().name.clone())
        .collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn undefined_parameter_respects_leniency() {
    let values: Values = [("debug", "1")].into_iter().collect();
    let strict = run(ParameterScope::Query, &[], &values, false);
    assert_eq!(strict.violations.keys(), vec!["undefined"]);
    let lenient = run(ParameterScope::Query, &[], &values, true);
    assert!(lenient.violations.is_empty());
}

#[test]
fn repeated_non_repeatable_parameter_is_reported_and_each_value_checked() {
    let declared = [Parameter::new("page", ParameterType::Integer)];
    let outcome = query(&declared, &[("page", "1"), ("page", "x")]);
    assert_eq!(outcome.violations.keys(), vec!["repeat.superfluous", "integer.invalid"]);
}

#[test]
fn repeatable_parameter_accepts_several_values() {
    let declared = [Parameter::new("tag", ParameterType::String).repeatable()];
    let outcome = query(&declared, &[("tag", "a"), ("tag", "b")]);
    assert!(outcome.violations.is_empty());
}

#[test]
fn header_names_compare_case_insensitively() {
    let declared = [Parameter::new("X-Request-Id", ParameterType::String).required()];
    let values: Values = [("x-request-id", "abc")].into_iter().collect();
    let outcome = run(ParameterScope::Header, &declared, &values, false);
    assert!(outcome.violations.is_empty(), "{}", outcome.violations);
}

#[test]
fn query_names_compare_case_sensitively() {
    let declared = [Parameter::new("limit", ParameterType::Integer).required()];
    let outcome = query(&declared, &[("LIMIT", "5")]);
    assert_eq!(outcome.violations.keys(), vec!["undefined", "required.missing"]);
}

// ============================================================================
// SECTION: Typed Values
// ============================================================================

#[test]
fn integer_bounds_are_inclusive() {
    let bounded = || {
        Parameter::new("limit", ParameterType::Integer).with_minimum(1).with_maximum(10)
    };
    assert_eq!(keys_for(bounded(), "0"), vec!["value.tooSmall"]);
    assert!(keys_for(bounded(), "1").is_empty());
    assert!(keys_for(bounded(), "10").is_empty());
    assert_eq!(keys_for(bounded(), "11"), vec!["value.tooBig"]);
    assert_eq!(keys_for(bounded(), "01"), vec!["integer.invalid"]);
}

#[test]
fn range_violation_carries_the_bound() {
    let declared = [Parameter::new("limit", ParameterType::Integer).with_minimum(1)];
    let outcome = query(&declared, &[("limit", "0")]);
    let violation = outcome.violations.records()[0].violation().as_parameter().unwrap();
    assert_eq!(
        violation.kind,
        ParameterViolationKind::ValueTooSmall {
            minimum: BigDecimal::from(1),
        }
    );
    assert_eq!(violation.value.as_deref(), Some("0"));
    assert_eq!(
        outcome.violations.messages(),
        vec!["query parameter 'limit' on GET /users: value '0' is less than minimum 1 (value.tooSmall)"]
    );
}

#[test]
fn large_integers_are_compared_exactly() {
    let parameter = Parameter::new("id", ParameterType::Integer).with_maximum(i64::MAX);
    assert!(keys_for(parameter.clone(), "9223372036854775807").is_empty());
    assert_eq!(keys_for(parameter, "9223372036854775808"), vec!["value.tooBig"]);
}

#[test]
fn number_range_uses_decimal_values() {
    let bounded = || {
        Parameter::new("ratio", ParameterType::Number).with_minimum(1).with_maximum(10)
    };
    assert_eq!(keys_for(bounded(), "0.5"), vec!["value.tooSmall"]);
    assert_eq!(keys_for(bounded(), ".5"), vec!["value.tooSmall"]);
    assert_eq!(keys_for(bounded(), "1.5e1"), vec!["value.tooBig"]);
    assert!(keys_for(bounded(), "2.25").is_empty());
    assert_eq!(keys_for(bounded(), "2.50"), vec!["number.invalid"]);
}

#[test]
fn exponents_beyond_decimal_range_are_still_range_checked() {
    let bounded = || {
        Parameter::new("score", ParameterType::Number).with_minimum(-100).with_maximum(100)
    };
    assert_eq!(keys_for(bounded(), "1e400"), vec!["value.tooBig"]);
    assert_eq!(keys_for(bounded(), "1e99999999999999999999"), vec!["value.tooBig"]);
    assert_eq!(keys_for(bounded(), "-1e99999999999999999999"), vec!["value.tooSmall"]);
    assert!(keys_for(bounded(), "1e-99999999999999999999").is_empty());

    let positive = Parameter::new("ratio", ParameterType::Number).with_minimum(1);
    assert_eq!(keys_for(positive, "1e-99999999999999999999"), vec!["value.tooSmall"]);
    let non_positive = Parameter::new("delta", ParameterType::Number).with_maximum(0);
    assert_eq!(keys_for(non_positive, "1e-99999999999999999999"), vec!["value.tooBig"]);
}

#[test]
fn unbounded_literal_contradicts_declared_bounds() {
    let bounded = Parameter::new("score", ParameterType::Number).with_maximum(100);
    assert_eq!(keys_for(bounded, "nan"), vec!["unbound"]);
    let unbounded = Parameter::new("score", ParameterType::Number);
    assert!(keys_for(unbounded.clone(), "nan").is_empty());
    assert!(keys_for(unbounded, "-inf").is_empty());
}

#[test]
fn boolean_accepts_only_lowercase_literals() {
    let flag = || Parameter::new("flag", ParameterType::Boolean);
    assert!(keys_for(flag(), "true").is_empty());
    assert!(keys_for(flag(), "false").is_empty());
    assert_eq!(keys_for(flag(), "TRUE"), vec!["boolean.invalid"]);
    assert_eq!(keys_for(flag(), "1"), vec!["boolean.invalid"]);
}

#[test]
fn date_follows_http_date_layout_strictly() {
    let since = || Parameter::new("since", ParameterType::Date);
    assert!(keys_for(since(), "Sun, 06 Nov 1994 08:49:37 GMT").is_empty());
    assert_eq!(keys_for(since(), "Sun, 32 Nov 1994 08:49:37 GMT"), vec!["date.invalid"]);
    assert_eq!(keys_for(since(), "1994-11-06T08:49:37Z"), vec!["date.invalid"]);
    assert_eq!(keys_for(since(), "Sun, 06 Nov 1994 08:49:37 UTC"), vec!["date.invalid"]);
    assert_eq!(keys_for(since(), "Mon, 06 Nov 1994 08:49:37 GMT"), vec!["date.invalid"]);
    assert_eq!(keys_for(since(), "Thu, 29 Feb 2001 08:49:37 GMT"), vec!["date.invalid"]);
}

#[test]
fn date_accepts_single_digit_day() {
    let since = Parameter::new("since", ParameterType::Date);
    assert!(keys_for(since.clone(), "Sun, 6 Nov 1994 08:49:37 GMT").is_empty());
    assert_eq!(keys_for(since, "Mon, 6 Nov 1994 08:49:37 GMT"), vec!["date.invalid"]);
}

#[test]
fn file_values_are_unchecked_but_reported_to_diagnostics() {
    let declared = [Parameter::new("upload", ParameterType::File)];
    let outcome = query(&declared, &[("upload", "anything")]);
    assert!(outcome.violations.is_empty());
    assert_eq!(
        outcome.diagnostics,
        vec![DiagnosticKind::ValueUnchecked {
            parameter: "upload".to_string(),
            declared_type: "file".to_string(),
        }]
    );
}

// ============================================================================
// SECTION: String Constraints
// ============================================================================

#[test]
fn string_constraints_are_independent() {
    let parameter = Parameter::new("code", ParameterType::String)
        .with_enumeration(["alpha", "beta"])
        .with_pattern("^[a-z]+$")
        .with_max_length(4);
    assert_eq!(
        keys_for(parameter, "GAMMA"),
        vec!["enum.invalid", "pattern.invalid", "length.tooBig"]
    );
}

#[test]
fn enumeration_violation_lists_allowed_values() {
    let declared =
        [Parameter::new("sort", ParameterType::String).with_enumeration(["asc", "desc"])];
    let outcome = query(&declared, &[("sort", "up")]);
    let violation = outcome.violations.records()[0].violation().as_parameter().unwrap();
    assert_eq!(
        violation.kind,
        ParameterViolationKind::EnumInvalid {
            allowed: vec!["asc".to_string(), "desc".to_string()],
        }
    );
}

#[test]
fn delimited_pattern_honours_case_flag() {
    let insensitive = Parameter::new("name", ParameterType::String).with_pattern("/^a+$/i");
    assert!(keys_for(insensitive, "AAA").is_empty());
    let quoted = Parameter::new("name", ParameterType::String).with_pattern("'^a+$'");
    assert_eq!(keys_for(quoted, "AAA"), vec!["pattern.invalid"]);
}

#[test]
fn pattern_must_match_whole_value() {
    let parameter = Parameter::new("sku", ParameterType::String).with_pattern("[0-9]{3}");
    assert!(keys_for(parameter.clone(), "123").is_empty());
    assert_eq!(keys_for(parameter, "a1234"), vec!["pattern.invalid"]);
}

#[test]
fn malformed_pattern_skips_check_and_emits_diagnostic() {
    let declared = [Parameter::new("name", ParameterType::String).with_pattern("(unclosed")];
    let outcome = query(&declared, &[("name", "value")]);
    assert!(outcome.violations.is_empty());
    assert_eq!(outcome.diagnostics.len(), 1);
    assert!(matches!(
        &outcome.diagnostics[0],
        DiagnosticKind::PatternRejected { parameter, pattern, .. }
            if parameter == "name" && pattern == "(unclosed"
    ));
}

#[test]
fn length_counts_characters_not_bytes() {
    let parameter =
        Parameter::new("name", ParameterType::String).with_min_length(5).with_max_length(5);
    assert!(keys_for(parameter.clone(), "héllo").is_empty());
    assert_eq!(keys_for(parameter, "hell"), vec!["length.tooSmall"]);
}

// ============================================================================
// SECTION: Determinism
// ============================================================================

#[test]
fn identical_inputs_yield_identical_violations() {
    let declared = [
        Parameter::new("limit", ParameterType::Integer).with_maximum(10),
        Parameter::new("sort", ParameterType::String).with_enumeration(["asc"]),
        Parameter::new("token", ParameterType::String).required(),
    ];
    let pairs = [("sort", "desc"), ("limit", "50"), ("extra", "1")];
    let first = query(&declared, &pairs).violations;
    let second = query(&declared, &pairs).violations;
    assert_eq!(first.messages(), second.messages());
    assert_eq!(first.keys(), vec!["enum.invalid", "value.tooBig", "undefined", "required.missing"]);
}
