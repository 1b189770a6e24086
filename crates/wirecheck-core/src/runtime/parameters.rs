// crates/wirecheck-core/src/runtime/parameters.rs
// ============================================================================
// Module: Wirecheck Parameter Validator
// Description: Checks observed parameter values against declared constraints.
// Purpose: Record presence, multiplicity, type, and range violations per value.
// Dependencies: crate::{core, interfaces, runtime::pattern}, bigdecimal, time
// ============================================================================

//! ## Overview
//! Validation runs in two passes over one parameter scope. The first pass
//! walks the observed names: undeclared names are reported unless the caller
//! accepts them, non-repeatable names with several values are reported, and
//! every value is checked against its declaration. The second pass reports
//! each required declaration that was never observed, in declaration order.
//!
//! Value checks dispatch on [`ParameterType`]. Numeric literals follow a
//! strict grammar (no leading zeros, no `+` sign) and are range-checked with
//! [`BigDecimal`] so large or fractional bounds never lose precision.
//! Tooling faults such as a pattern that does not compile are sent to the
//! diagnostics sink and the affected check is skipped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::Zero;
use time::Date;
use time::Time;
use time::format_description::BorrowedFormatItem;
use time::parsing::Parsed;
use time::macros::format_description;

use crate::core::parameter::Parameter;
use crate::core::parameter::ParameterType;
use crate::core::values::Values;
use crate::core::violations::ParameterScope;
use crate::core::violations::ParameterViolation;
use crate::core::violations::ParameterViolationKind;
use crate::core::violations::Violations;
use crate::interfaces::DiagnosticEvent;
use crate::interfaces::DiagnosticKind;
use crate::interfaces::DiagnosticsSink;
use crate::runtime::pattern::compile_pattern;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// HTTP date layout (`Sun, 06 Nov 1994 08:49:37 GMT`); the day takes one or two digits.
const HTTP_DATE: &[BorrowedFormatItem<'_>] = format_description!(
    "[weekday repr:short], [day padding:none] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// Number literals that carry no finite value.
const UNBOUNDED_LITERALS: [&str; 3] = ["inf", "-inf", "nan"];

// ============================================================================
// SECTION: Context
// ============================================================================

/// Scope and exchange location attached to every violation of one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterContext {
    /// Where the parameters were carried.
    pub scope: ParameterScope,
    /// Exchange location (`GET /users/{id}`), when known.
    pub location: Option<String>,
}

impl ParameterContext {
    /// Creates a context without a location.
    #[must_use]
    pub const fn new(scope: ParameterScope) -> Self {
        Self {
            scope,
            location: None,
        }
    }

    /// Attaches an exchange location.
    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns true when `declared` names the same parameter as `observed`.
    fn names_match(&self, declared: &str, observed: &str) -> bool {
        if self.scope.case_insensitive_names() {
            declared.eq_ignore_ascii_case(observed)
        } else {
            declared == observed
        }
    }
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Writes parameter violations into a ledger.
pub struct ParameterValidator<'a> {
    /// Ledger receiving violations.
    violations: &'a mut Violations,
    /// Sink receiving tooling diagnostics.
    diagnostics: &'a dyn DiagnosticsSink,
    /// Whether undeclared observed names are tolerated.
    accept_undefined: bool,
}

impl<'a> ParameterValidator<'a> {
    /// Creates a validator that reports undeclared names.
    #[must_use]
    pub fn new(violations: &'a mut Violations, diagnostics: &'a dyn DiagnosticsSink) -> Self {
        Self {
            violations,
            diagnostics,
            accept_undefined: false,
        }
    }

    /// Sets whether undeclared observed names are tolerated.
    #[must_use]
    pub const fn accept_undefined(mut self, accept: bool) -> Self {
        self.accept_undefined = accept;
        self
    }

    /// Validates every observed value in `values` against `declared`.
    pub fn validate_parameters<P: Borrow<Parameter>>(
        &mut self,
        context: &ParameterContext,
        declared: &[P],
        values: &Values,
    ) {
        let mut found = vec![false; declared.len()];
        for (name, observed) in values.iter() {
            let position = declared
                .iter()
                .position(|parameter| context.names_match(declared_name(parameter), name));
            let Some(index) = position else {
                if !self.accept_undefined {
                    self.report(context, name, None, ParameterViolationKind::Undefined);
                }
                continue;
            };
            let parameter: &Parameter = declared[index].borrow();
            if !parameter.repeat && observed.len() > 1 {
                self.report(context, name, None, ParameterViolationKind::RepeatSuperfluous);
            }
            for value in observed {
                self.validate_parameter(context, parameter, value);
            }
            found[index] = true;
        }
        for (entry, seen) in declared.iter().zip(found) {
            let parameter: &Parameter = entry.borrow();
            if parameter.required && !seen {
                let kind = ParameterViolationKind::RequiredMissing;
                self.report(context, &parameter.name, None, kind);
            }
        }
    }

    /// Validates one observed value against its declaration.
    pub fn validate_parameter(
        &mut self,
        context: &ParameterContext,
        parameter: &Parameter,
        value: &str,
    ) {
        match parameter.param_type {
            ParameterType::Boolean => {
                if value != "true" && value != "false" {
                    self.reject(context, parameter, value, ParameterViolationKind::BooleanInvalid);
                }
            }
            ParameterType::Date => {
                if !is_http_date(value) {
                    self.reject(context, parameter, value, ParameterViolationKind::DateInvalid);
                }
            }
            ParameterType::File => {
                self.diagnostics.record(&DiagnosticEvent::new(DiagnosticKind::ValueUnchecked {
                    parameter: parameter.name.clone(),
                    declared_type: parameter.param_type.to_string(),
                }));
            }
            ParameterType::Integer => {
                if is_integer_literal(value) {
                    self.check_range(context, parameter, value);
                } else {
                    self.reject(context, parameter, value, ParameterViolationKind::IntegerInvalid);
                }
            }
            ParameterType::Number => {
                if !is_number_literal(value) {
                    self.reject(context, parameter, value, ParameterViolationKind::NumberInvalid);
                } else if UNBOUNDED_LITERALS.contains(&value) {
                    if parameter.has_numeric_bounds() {
                        self.reject(context, parameter, value, ParameterViolationKind::Unbound);
                    }
                } else {
                    self.check_range(context, parameter, value);
                }
            }
            ParameterType::String => self.check_string(context, parameter, value),
        }
    }

    /// Checks a grammatically valid numeric literal against the declared bounds.
    fn check_range(&mut self, context: &ParameterContext, parameter: &Parameter, value: &str) {
        if !parameter.has_numeric_bounds() {
            return;
        }
        let number = NumericLiteral::parse(value);
        if let Some(minimum) = &parameter.minimum
            && number.cmp_bound(minimum) == Ordering::Less
        {
            let kind = ParameterViolationKind::ValueTooSmall {
                minimum: minimum.clone(),
            };
            self.reject(context, parameter, value, kind);
        }
        if let Some(maximum) = &parameter.maximum
            && number.cmp_bound(maximum) == Ordering::Greater
        {
            let kind = ParameterViolationKind::ValueTooBig {
                maximum: maximum.clone(),
            };
            self.reject(context, parameter, value, kind);
        }
    }

    /// Applies the independent string constraints.
    fn check_string(&mut self, context: &ParameterContext, parameter: &Parameter, value: &str) {
        if let Some(allowed) = &parameter.enumeration
            && !allowed.iter().any(|candidate| candidate == value)
        {
            let kind = ParameterViolationKind::EnumInvalid {
                allowed: allowed.clone(),
            };
            self.reject(context, parameter, value, kind);
        }
        if let Some(pattern) = &parameter.pattern {
            match compile_pattern(pattern) {
                Ok(regex) => {
                    if !regex.is_match(value) {
                        let kind = ParameterViolationKind::PatternInvalid {
                            pattern: pattern.clone(),
                        };
                        self.reject(context, parameter, value, kind);
                    }
                }
                Err(err) => {
                    self.diagnostics.record(&DiagnosticEvent::new(
                        DiagnosticKind::PatternRejected {
                            parameter: parameter.name.clone(),
                            pattern: pattern.clone(),
                            error: err.to_string(),
                        },
                    ));
                }
            }
        }
        let length = u64::try_from(value.chars().count()).unwrap_or(u64::MAX);
        if let Some(min_length) = parameter.min_length
            && length < min_length
        {
            let kind = ParameterViolationKind::LengthTooSmall {
                min_length,
            };
            self.reject(context, parameter, value, kind);
        }
        if let Some(max_length) = parameter.max_length
            && length > max_length
        {
            let kind = ParameterViolationKind::LengthTooBig {
                max_length,
            };
            self.reject(context, parameter, value, kind);
        }
    }

    /// Records a violation for one offending value.
    fn reject(
        &mut self,
        context: &ParameterContext,
        parameter: &Parameter,
        value: &str,
        kind: ParameterViolationKind,
    ) {
        self.report(context, &parameter.name, Some(value), kind);
    }

    /// Records a parameter violation.
    fn report(
        &mut self,
        context: &ParameterContext,
        name: &str,
        value: Option<&str>,
        kind: ParameterViolationKind,
    ) {
        self.violations.add(ParameterViolation {
            scope: context.scope,
            name: name.to_string(),
            location: context.location.clone(),
            value: value.map(ToString::to_string),
            kind,
        });
    }
}

/// Returns the declared name of a borrowed parameter.
fn declared_name<P: Borrow<Parameter>>(parameter: &P) -> &str {
    let parameter: &Parameter = parameter.borrow();
    &parameter.name
}

// ============================================================================
// SECTION: Literal Grammar
// ============================================================================

/// Returns true for `0` or an optionally negative integer without leading zeros.
#[must_use]
pub fn is_integer_literal(value: &str) -> bool {
    value == "0" || is_nonzero_digits(value.strip_prefix('-').unwrap_or(value))
}

/// Returns true for a number literal accepted by `number` parameters.
///
/// Accepts `0`, `inf`, `-inf`, `nan`, and optionally negative decimals
/// without leading zeros or trailing fractional zeros, with an optional
/// exponent (`e`, optional sign, no leading zeros).
#[must_use]
pub fn is_number_literal(value: &str) -> bool {
    if value == "0" || UNBOUNDED_LITERALS.contains(&value) {
        return true;
    }
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (mantissa, exponent) = match unsigned.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((whole, fraction)) => {
            (whole.is_empty() || whole == "0" || is_nonzero_digits(whole))
                && fraction.bytes().all(|byte| byte.is_ascii_digit())
                && fraction.bytes().last().is_some_and(|byte| byte != b'0')
        }
        None => is_nonzero_digits(mantissa),
    };
    let exponent_ok = exponent.is_none_or(|exponent| {
        let digits = exponent
            .strip_prefix('-')
            .or_else(|| exponent.strip_prefix('+'))
            .unwrap_or(exponent);
        is_nonzero_digits(digits)
    });
    mantissa_ok && exponent_ok
}

/// Returns true for a non-empty digit run that does not start with `0`.
fn is_nonzero_digits(value: &str) -> bool {
    let mut bytes = value.bytes();
    bytes.next().is_some_and(|first| (b'1' ..= b'9').contains(&first))
        && bytes.all(|byte| byte.is_ascii_digit())
}

/// Returns true for an HTTP date whose day name agrees with its calendar date.
fn is_http_date(value: &str) -> bool {
    let mut parsed = Parsed::new();
    let consumed = parsed.parse_items(value.as_bytes(), HTTP_DATE).is_ok_and(<[u8]>::is_empty);
    consumed
        && Time::try_from(parsed).is_ok()
        && Date::try_from(parsed).is_ok_and(|date| parsed.weekday() == Some(date.weekday()))
}

/// Finite numeric literal positioned for range checks.
#[derive(Debug, Clone, PartialEq, Eq)]
enum NumericLiteral {
    /// Literal representable as a decimal.
    Decimal(BigDecimal),
    /// Literal whose exponent exceeds the decimal range.
    Overflow {
        /// Whether the mantissa is negative.
        negative: bool,
        /// Whether the exponent is negative (magnitude below any declared bound).
        vanishing: bool,
    },
}

impl NumericLiteral {
    /// Classifies a finite literal that already passed the grammar check.
    fn parse(value: &str) -> Self {
        parse_decimal(value).map_or_else(
            || Self::Overflow {
                negative: value.starts_with('-'),
                vanishing: value.split_once('e').is_some_and(|(_, exp)| exp.starts_with('-')),
            },
            Self::Decimal,
        )
    }

    /// Orders the literal against a finite bound.
    fn cmp_bound(&self, bound: &BigDecimal) -> Ordering {
        match self {
            Self::Decimal(number) => number.cmp(bound),
            Self::Overflow {
                negative,
                vanishing: false,
            } => {
                if *negative {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            Self::Overflow {
                negative,
                vanishing: true,
            } => {
                let zero = BigDecimal::zero();
                let below = if *negative { *bound >= zero } else { *bound > zero };
                if below { Ordering::Less } else { Ordering::Greater }
            }
        }
    }
}

/// Parses a finite literal that already passed the grammar check.
fn parse_decimal(value: &str) -> Option<BigDecimal> {
    let normalized = if let Some(rest) = value.strip_prefix("-.") {
        format!("-0.{rest}")
    } else if let Some(rest) = value.strip_prefix('.') {
        format!("0.{rest}")
    } else {
        value.to_string()
    };
    BigDecimal::from_str(&normalized).ok()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::panic, clippy::unwrap_used, clippy::expect_used, reason = "Test assertions.")]

    use std::cmp::Ordering;

    use bigdecimal::BigDecimal;

    use super::NumericLiteral;
    use super::is_http_date;
    use super::is_integer_literal;
    use super::is_number_literal;
    use super::parse_decimal;

    #[test]
    fn integer_grammar_rejects_leading_zeros_and_plus() {
        for accepted in ["0", "7", "-12", "1000"] {
            assert!(is_integer_literal(accepted), "{accepted}");
        }
        for rejected in ["01", "-0", "+5", "", "-", "1.0", "1e3"] {
            assert!(!is_integer_literal(rejected), "{rejected}");
        }
    }

    #[test]
    fn number_grammar_matches_declared_forms() {
        for accepted in ["0", "inf", "-inf", "nan", "1.5", "-0.25", ".5", "12", "3e10", "1.5e-3"] {
            assert!(is_number_literal(accepted), "{accepted}");
        }
        for rejected in ["1.50", "00.5", "1.", "0e5", "1e05", "-nan", "+1", "1.5e", "e5", "."] {
            assert!(!is_number_literal(rejected), "{rejected}");
        }
    }

    #[test]
    fn leading_dot_literals_parse_as_decimals() {
        assert_eq!(parse_decimal(".5"), parse_decimal("0.5"));
        assert_eq!(parse_decimal("-.5"), parse_decimal("-0.5"));
        assert!(parse_decimal("1.5e-3").is_some());
    }

    #[test]
    fn exponent_overflow_keeps_its_sign_and_direction() {
        let hundred = BigDecimal::from(100);
        let huge = NumericLiteral::parse("1e99999999999999999999");
        assert!(matches!(huge, NumericLiteral::Overflow { .. }));
        assert_eq!(huge.cmp_bound(&hundred), Ordering::Greater);
        let huge_negative = NumericLiteral::parse("-1e99999999999999999999");
        assert_eq!(huge_negative.cmp_bound(&hundred), Ordering::Less);
        let tiny = NumericLiteral::parse("1e-99999999999999999999");
        assert_eq!(tiny.cmp_bound(&BigDecimal::from(0)), Ordering::Greater);
        assert_eq!(tiny.cmp_bound(&hundred), Ordering::Less);
        let negative_tiny = NumericLiteral::parse("-1e-99999999999999999999");
        assert_eq!(negative_tiny.cmp_bound(&BigDecimal::from(0)), Ordering::Less);
        assert_eq!(negative_tiny.cmp_bound(&BigDecimal::from(-1)), Ordering::Greater);
    }

    #[test]
    fn http_date_checks_day_name_against_calendar() {
        assert!(is_http_date("Sun, 06 Nov 1994 08:49:37 GMT"));
        assert!(is_http_date("Sun, 6 Nov 1994 08:49:37 GMT"));
        assert!(!is_http_date("Mon, 06 Nov 1994 08:49:37 GMT"));
        assert!(!is_http_date("Sun, 06 Nov 1994 24:00:00 GMT"));
    }
}
