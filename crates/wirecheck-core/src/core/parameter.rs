// crates/wirecheck-core/src/core/parameter.rs
// ============================================================================
// Module: Wirecheck Parameter Declarations
// Description: Declared parameter types and constraints.
// Purpose: Describe the constraints observed query, header, and path values must meet.
// Dependencies: bigdecimal, serde
// ============================================================================

//! ## Overview
//! A [`Parameter`] names a value carried in a URI template, base URI, query
//! string, header, or form body, and declares its type plus optional
//! constraints. Numeric bounds use [`BigDecimal`] so range checks never lose
//! precision on large or fractional values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde::Serialize;

use crate::core::model::ModelError;

// ============================================================================
// SECTION: Parameter Types
// ============================================================================

/// Declared parameter type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Literal `true` or `false`.
    Boolean,
    /// HTTP date (`Sun, 06 Nov 1994 08:49:37 GMT`).
    Date,
    /// File upload; values are not inspected.
    File,
    /// Integer without leading zeros.
    Integer,
    /// Decimal number, including `inf`, `-inf`, and `nan`.
    Number,
    /// Free-form string.
    #[default]
    String,
}

impl ParameterType {
    /// Returns the stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::File => "file",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Parameter
// ============================================================================

/// Declared parameter with its constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type", default)]
    pub param_type: ParameterType,
    /// Whether the parameter must be present.
    #[serde(default)]
    pub required: bool,
    /// Whether more than one value may be supplied.
    #[serde(default)]
    pub repeat: bool,
    /// Allowed values for string parameters.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<String>>,
    /// Pattern for string parameters, possibly quoted or in `/body/flags` form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Inclusive lower bound for numeric parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<BigDecimal>,
    /// Inclusive upper bound for numeric parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<BigDecimal>,
    /// Minimum string length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum string length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

impl Parameter {
    /// Creates an optional, non-repeatable parameter without constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, param_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            param_type,
            required: false,
            repeat: false,
            enumeration: None,
            pattern: None,
            minimum: None,
            maximum: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Marks the parameter as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the parameter as repeatable.
    #[must_use]
    pub const fn repeatable(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Sets the allowed values.
    #[must_use]
    pub fn with_enumeration<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enumeration = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the inclusive minimum.
    #[must_use]
    pub fn with_minimum(mut self, minimum: impl Into<BigDecimal>) -> Self {
        self.minimum = Some(minimum.into());
        self
    }

    /// Sets the inclusive maximum.
    #[must_use]
    pub fn with_maximum(mut self, maximum: impl Into<BigDecimal>) -> Self {
        self.maximum = Some(maximum.into());
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub const fn with_min_length(mut self, min_length: u64) -> Self {
        self.min_length = Some(min_length);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Returns true when either numeric bound is declared.
    #[must_use]
    pub const fn has_numeric_bounds(&self) -> bool {
        self.minimum.is_some() || self.maximum.is_some()
    }
}

// ============================================================================
// SECTION: Lookup Helpers
// ============================================================================

/// Returns every parameter named `name`, in declaration order.
#[must_use]
pub fn parameters_by_name<'a>(parameters: &'a [Parameter], name: &str) -> Vec<&'a Parameter> {
    parameters.iter().filter(|parameter| parameter.name == name).collect()
}

/// Returns the single parameter named `name`.
///
/// # Errors
///
/// Returns [`ModelError::AmbiguousParameter`] when more than one parameter
/// carries the name; callers that expect uniqueness treat this as a bug in
/// the contract model rather than a traffic violation.
pub fn parameter_by_name<'a>(
    parameters: &'a [Parameter],
    name: &str,
) -> Result<Option<&'a Parameter>, ModelError> {
    let mut matches = parameters.iter().filter(|parameter| parameter.name == name);
    let first = matches.next();
    if matches.next().is_some() {
        return Err(ModelError::AmbiguousParameter(name.to_string()));
    }
    Ok(first)
}
