// crates/wirecheck-core/src/runtime/mod.rs
// ============================================================================
// Module: Wirecheck Runtime
// Description: Template matching, resource resolution, and value validation.
// Purpose: Classify observed traffic against the contract model.
// Dependencies: crate::{core, interfaces}, bigdecimal, regex, time, jsonschema
// ============================================================================

//! ## Overview
//! Runtime modules turn observed requests and responses into violations.
//! Every operation is synchronous and deterministic for identical input; the
//! contract model is only ever read.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod checker;
pub mod matcher;
pub mod parameters;
pub mod pattern;
pub mod resolver;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use checker::CheckOptions;
pub use checker::ContractChecker;
pub use checker::ObservedRequest;
pub use checker::ObservedResponse;
pub use checker::media_type_essence;
pub use matcher::MatchOutcome;
pub use matcher::match_template;
pub use parameters::ParameterContext;
pub use parameters::ParameterValidator;
pub use parameters::is_integer_literal;
pub use parameters::is_number_literal;
pub use pattern::NormalizedPattern;
pub use pattern::compile_pattern;
pub use pattern::normalize_pattern;
pub use resolver::ResolvedResource;
pub use resolver::effective_base_uri_parameters;
pub use resolver::find_resource;
pub use resolver::find_uri_parameter;
pub use resolver::resolve;
pub use schema::JsonSchemaValidator;
pub use schema::find_schema_validator;
