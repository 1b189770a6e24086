// crates/wirecheck-core/src/core/mod.rs
// ============================================================================
// Module: Wirecheck Core Types
// Description: Contract model, observed value maps, and violation ledgers.
// Purpose: Provide the immutable contract tree and the per-exchange report types.
// Dependencies: bigdecimal, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe the declared API contract (resources, methods,
//! parameters) and the records produced while validating one exchange. The
//! contract model is read-only after construction and safe to share; reports
//! and ledgers are owned by a single validation pass.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod definition;
pub mod model;
pub mod parameter;
pub mod report;
pub mod values;
pub mod violations;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use definition::ApiDefinition;
pub use definition::Body;
pub use definition::Method;
pub use definition::ResourceDefinition;
pub use definition::Response;
pub use model::ContractModel;
pub use model::DefinitionError;
pub use model::ModelError;
pub use model::Resource;
pub use model::ResourceId;
pub use parameter::Parameter;
pub use parameter::ParameterType;
pub use parameter::parameter_by_name;
pub use parameter::parameters_by_name;
pub use report::Report;
pub use report::ReportScope;
pub use values::Values;
pub use violations::ParameterScope;
pub use violations::ParameterViolation;
pub use violations::ParameterViolationKind;
pub use violations::Violation;
pub use violations::ViolationRecord;
pub use violations::Violations;
