// crates/wirecheck-config/src/lib.rs
// ============================================================================
// Module: Wirecheck Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for wirecheck.toml semantics.
// Dependencies: wirecheck-core, serde, toml
// ============================================================================

//! ## Overview
//! `wirecheck-config` defines the configuration model for Wirecheck. It
//! provides strict validation and turns a loaded configuration into the
//! checker switches and diagnostics sink used by `wirecheck-core`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
