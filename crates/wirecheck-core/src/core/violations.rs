// crates/wirecheck-core/src/core/violations.rs
// ============================================================================
// Module: Wirecheck Violations
// Description: Structured violation records and the append-only ledger.
// Purpose: Record every non-conforming observation with a stable key and payload.
// Dependencies: bigdecimal, serde, serde_json
// ============================================================================

//! ## Overview
//! Every mismatch between observed traffic and the contract becomes a
//! [`Violation`]: a closed enum whose variants carry the data needed to
//! render a message and to inspect the mismatch programmatically. Each
//! violation exposes a stable key (`required.missing`, `value.tooBig`, ...)
//! that consumers may pattern-match on.
//!
//! [`Violations`] is the append-only ledger. Records keep insertion order and
//! are never deduplicated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Parameter Violations
// ============================================================================

/// Where a validated parameter was carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterScope {
    /// Base-URI template variable.
    BaseUri,
    /// Resource URI-template variable.
    Uri,
    /// Query string parameter.
    Query,
    /// Request or response header.
    Header,
    /// Form body field.
    Form,
}

impl ParameterScope {
    /// Returns the human-readable label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BaseUri => "baseUri parameter",
            Self::Uri => "uri parameter",
            Self::Query => "query parameter",
            Self::Header => "header",
            Self::Form => "form parameter",
        }
    }

    /// Returns true when names in this scope compare case-insensitively.
    #[must_use]
    pub const fn case_insensitive_names(self) -> bool {
        matches!(self, Self::Header)
    }
}

/// Kind of parameter violation with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "key")]
pub enum ParameterViolationKind {
    /// Observed name is not declared.
    #[serde(rename = "undefined")]
    Undefined,
    /// Several values were observed for a non-repeatable parameter.
    #[serde(rename = "repeat.superfluous")]
    RepeatSuperfluous,
    /// A required parameter was not observed.
    #[serde(rename = "required.missing")]
    RequiredMissing,
    /// Value is not `true` or `false`.
    #[serde(rename = "boolean.invalid")]
    BooleanInvalid,
    /// Value is not an HTTP date.
    #[serde(rename = "date.invalid")]
    DateInvalid,
    /// Value does not follow the integer grammar.
    #[serde(rename = "integer.invalid")]
    IntegerInvalid,
    /// Value does not follow the number grammar.
    #[serde(rename = "number.invalid")]
    NumberInvalid,
    /// Unbounded literal observed for a parameter that declares bounds.
    #[serde(rename = "unbound")]
    Unbound,
    /// Value is not in the declared enumeration.
    #[serde(rename = "enum.invalid")]
    EnumInvalid {
        /// Allowed values.
        allowed: Vec<String>,
    },
    /// Value does not match the declared pattern.
    #[serde(rename = "pattern.invalid")]
    PatternInvalid {
        /// Pattern as declared.
        pattern: String,
    },
    /// Value is shorter than `minLength`.
    #[serde(rename = "length.tooSmall")]
    LengthTooSmall {
        /// Declared minimum length.
        min_length: u64,
    },
    /// Value is longer than `maxLength`.
    #[serde(rename = "length.tooBig")]
    LengthTooBig {
        /// Declared maximum length.
        max_length: u64,
    },
    /// Value is below `minimum`.
    #[serde(rename = "value.tooSmall")]
    ValueTooSmall {
        /// Declared minimum.
        minimum: BigDecimal,
    },
    /// Value is above `maximum`.
    #[serde(rename = "value.tooBig")]
    ValueTooBig {
        /// Declared maximum.
        maximum: BigDecimal,
    },
}

impl ParameterViolationKind {
    /// Returns the stable violation key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::RepeatSuperfluous => "repeat.superfluous",
            Self::RequiredMissing => "required.missing",
            Self::BooleanInvalid => "boolean.invalid",
            Self::DateInvalid => "date.invalid",
            Self::IntegerInvalid => "integer.invalid",
            Self::NumberInvalid => "number.invalid",
            Self::Unbound => "unbound",
            Self::EnumInvalid {
                ..
            } => "enum.invalid",
            Self::PatternInvalid {
                ..
            } => "pattern.invalid",
            Self::LengthTooSmall {
                ..
            } => "length.tooSmall",
            Self::LengthTooBig {
                ..
            } => "length.tooBig",
            Self::ValueTooSmall {
                ..
            } => "value.tooSmall",
            Self::ValueTooBig {
                ..
            } => "value.tooBig",
        }
    }

    /// Renders the kind-specific part of the message.
    fn describe(&self, value: &str) -> String {
        match self {
            Self::Undefined => "is not defined".to_string(),
            Self::RepeatSuperfluous => "is not repeatable but has several values".to_string(),
            Self::RequiredMissing => "is required but missing".to_string(),
            Self::BooleanInvalid => format!("value '{value}' is not a valid boolean"),
            Self::DateInvalid => format!("value '{value}' is not a valid HTTP date"),
            Self::IntegerInvalid => format!("value '{value}' is not a valid integer"),
            Self::NumberInvalid => format!("value '{value}' is not a valid number"),
            Self::Unbound => {
                format!("value '{value}' is unbounded but the parameter declares bounds")
            }
            Self::EnumInvalid {
                allowed,
            } => format!("value '{value}' is not one of [{}]", allowed.join(", ")),
            Self::PatternInvalid {
                pattern,
            } => format!("value '{value}' does not match pattern {pattern}"),
            Self::LengthTooSmall {
                min_length,
            } => format!("value '{value}' is shorter than {min_length} characters"),
            Self::LengthTooBig {
                max_length,
            } => format!("value '{value}' is longer than {max_length} characters"),
            Self::ValueTooSmall {
                minimum,
            } => format!("value '{value}' is less than minimum {minimum}"),
            Self::ValueTooBig {
                maximum,
            } => format!("value '{value}' is greater than maximum {maximum}"),
        }
    }
}

/// Violation raised for one declared or observed parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterViolation {
    /// Where the parameter was carried.
    pub scope: ParameterScope,
    /// Parameter name.
    pub name: String,
    /// Exchange location (`GET /users/{id}`), when known.
    pub location: Option<String>,
    /// Offending value, when the violation concerns one value.
    pub value: Option<String>,
    /// Violation kind with payload.
    #[serde(flatten)]
    pub kind: ParameterViolationKind,
}

impl fmt::Display for ParameterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.scope.label(), self.name)?;
        if let Some(location) = &self.location {
            write!(f, " on {location}")?;
        }
        let detail = self.kind.describe(self.value.as_deref().unwrap_or_default());
        write!(f, ": {detail} ({})", self.kind.key())
    }
}

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Structured violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum Violation {
    /// Parameter-level violation.
    Parameter(ParameterViolation),
    /// Observed base URI does not match the declared base URI template.
    BaseUriUnmatched {
        /// Observed base URI.
        base_uri: String,
        /// Declared template.
        template: String,
    },
    /// No resource matches the observed path.
    ResourceUndefined {
        /// Observed path.
        path: String,
    },
    /// The resource does not declare the observed method.
    ActionUndefined {
        /// Observed method.
        method: String,
        /// Full URI of the resolved resource.
        resource: String,
    },
    /// Content type is not among the declared bodies.
    MediaTypeUndefined {
        /// Exchange location.
        location: String,
        /// Observed media type.
        media_type: String,
    },
    /// Content was sent where no body is declared.
    BodySuperfluous {
        /// Exchange location.
        location: String,
    },
    /// Body does not satisfy its schema, or the schema cannot be used.
    SchemaInvalid {
        /// Exchange location.
        location: String,
        /// Validator detail.
        detail: String,
    },
    /// The observed status code is not declared.
    ResponseCodeUndefined {
        /// Exchange location.
        location: String,
        /// Observed status code.
        code: String,
    },
    /// Checking itself failed.
    CheckingException {
        /// Failure detail.
        detail: String,
    },
}

impl Violation {
    /// Returns the stable violation key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Parameter(violation) => violation.kind.key(),
            Self::BaseUriUnmatched {
                ..
            } => "baseUri.unmatched",
            Self::ResourceUndefined {
                ..
            } => "resource.undefined",
            Self::ActionUndefined {
                ..
            } => "action.undefined",
            Self::MediaTypeUndefined {
                ..
            } => "mediaType.undefined",
            Self::BodySuperfluous {
                ..
            } => "body.superfluous",
            Self::SchemaInvalid {
                ..
            } => "schema.invalid",
            Self::ResponseCodeUndefined {
                ..
            } => "responseCode.undefined",
            Self::CheckingException {
                ..
            } => "checking.exception",
        }
    }

    /// Returns the parameter payload, if this is a parameter violation.
    #[must_use]
    pub const fn as_parameter(&self) -> Option<&ParameterViolation> {
        match self {
            Self::Parameter(violation) => Some(violation),
            _ => None,
        }
    }
}

impl From<ParameterViolation> for Violation {
    fn from(value: ParameterViolation) -> Self {
        Self::Parameter(value)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key();
        match self {
            Self::Parameter(violation) => violation.fmt(f),
            Self::BaseUriUnmatched {
                base_uri,
                template,
            } => write!(f, "base uri '{base_uri}' does not match {template} ({key})"),
            Self::ResourceUndefined {
                path,
            } => write!(f, "no resource matches path '{path}' ({key})"),
            Self::ActionUndefined {
                method,
                resource,
            } => write!(f, "method {method} is not defined on {resource} ({key})"),
            Self::MediaTypeUndefined {
                location,
                media_type,
            } => write!(f, "media type '{media_type}' is not defined on {location} ({key})"),
            Self::BodySuperfluous {
                location,
            } => write!(f, "body is not allowed on {location} ({key})"),
            Self::SchemaInvalid {
                location,
                detail,
            } => write!(f, "body of {location} violates its schema: {detail} ({key})"),
            Self::ResponseCodeUndefined {
                location,
                code,
            } => write!(f, "response code {code} is not defined on {location} ({key})"),
            Self::CheckingException {
                detail,
            } => write!(f, "checking failed: {detail} ({key})"),
        }
    }
}

// ============================================================================
// SECTION: Ledger
// ============================================================================

/// One ledger entry: rendered message, structured violation, optional attachment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationRecord {
    /// Rendered message.
    message: String,
    /// Structured violation.
    violation: Violation,
    /// Opaque attachment for structured consumers.
    #[serde(skip_serializing_if = "Option::is_none")]
    attachment: Option<Value>,
}

impl ViolationRecord {
    /// Returns the rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the structured violation.
    #[must_use]
    pub const fn violation(&self) -> &Violation {
        &self.violation
    }

    /// Returns the attached object, if any.
    #[must_use]
    pub const fn attachment(&self) -> Option<&Value> {
        self.attachment.as_ref()
    }

    /// Returns the stable violation key.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.violation.key()
    }
}

/// Append-only, ordered violation ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    /// Records in insertion order.
    records: Vec<ViolationRecord>,
}

impl Violations {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a violation.
    pub fn add(&mut self, violation: impl Into<Violation>) {
        self.push(violation.into(), None);
    }

    /// Appends a violation with an attached object.
    pub fn add_with(&mut self, violation: impl Into<Violation>, attachment: Value) {
        self.push(violation.into(), Some(attachment));
    }

    /// Appends a violation when `condition` holds.
    pub fn add_if(&mut self, condition: bool, violation: impl Into<Violation>) {
        if condition {
            self.add(violation);
        }
    }

    /// Appends every record of `other`, preserving order.
    pub fn add_all(&mut self, other: &Self) {
        self.records.extend(other.records.iter().cloned());
    }

    /// Renders and stores one record.
    fn push(&mut self, violation: Violation, attachment: Option<Value>) {
        self.records.push(ViolationRecord {
            message: violation.to_string(),
            violation,
            attachment,
        });
    }

    /// Returns the number of records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the ledger holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ViolationRecord] {
        &self.records
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ViolationRecord> {
        self.records.iter()
    }

    /// Returns the rendered messages in insertion order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.records.iter().map(ViolationRecord::message).collect()
    }

    /// Returns the violation keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.records.iter().map(ViolationRecord::key).collect()
    }

    /// Returns true when any record carries `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.records.iter().any(|record| record.key() == key)
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a ViolationRecord;
    type IntoIter = std::slice::Iter<'a, ViolationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, record) in self.records.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(&record.message)?;
        }
        f.write_str("]")
    }
}
