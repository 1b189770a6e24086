// crates/wirecheck-core/src/lib.rs
// ============================================================================
// Module: Wirecheck Core Library
// Description: Public API surface for the Wirecheck conformance engine.
// Purpose: Expose contract types, interfaces, and runtime validators.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Wirecheck core classifies observed HTTP traffic against a declared API
//! contract. Observed paths are resolved to the most specific resource in the
//! contract tree, observed parameters are checked against their declared
//! constraints, and every mismatch is recorded as a structured violation in a
//! per-exchange [`Report`]. Conformance failures are data, never errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::DiagnosticEvent;
pub use interfaces::DiagnosticKind;
pub use interfaces::DiagnosticLevel;
pub use interfaces::DiagnosticsSink;
pub use interfaces::FileDiagnosticsSink;
pub use interfaces::MemoryDiagnosticsSink;
pub use interfaces::NoopDiagnosticsSink;
pub use interfaces::SchemaError;
pub use interfaces::SchemaValidator;
pub use interfaces::StderrDiagnosticsSink;
pub use runtime::CheckOptions;
pub use runtime::ContractChecker;
pub use runtime::JsonSchemaValidator;
pub use runtime::MatchOutcome;
pub use runtime::NormalizedPattern;
pub use runtime::ObservedRequest;
pub use runtime::ObservedResponse;
pub use runtime::ParameterContext;
pub use runtime::ParameterValidator;
pub use runtime::ResolvedResource;
pub use runtime::compile_pattern;
pub use runtime::effective_base_uri_parameters;
pub use runtime::find_resource;
pub use runtime::find_schema_validator;
pub use runtime::find_uri_parameter;
pub use runtime::is_integer_literal;
pub use runtime::is_number_literal;
pub use runtime::match_template;
pub use runtime::media_type_essence;
pub use runtime::normalize_pattern;
pub use runtime::resolve;
