// crates/wirecheck-core/src/interfaces/mod.rs
// ============================================================================
// Module: Wirecheck Interfaces
// Description: Injected diagnostics sinks and pluggable body schema validators.
// Purpose: Define the seams the runtime calls without hard dependencies.
// Dependencies: crate::core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Validation never writes to a global logger. Tooling faults (a declared
//! pattern that does not compile, a schema that cannot be used) and values
//! that are deliberately left unchecked are reported as [`DiagnosticEvent`]s
//! to an injected [`DiagnosticsSink`]. Sinks emit JSON lines so deployments
//! can route them to their preferred logging pipeline.
//!
//! Body checking is delegated to a [`SchemaValidator`] selected by media type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::violations::Violations;

// ============================================================================
// SECTION: Diagnostic Events
// ============================================================================

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    /// Informational notice.
    Notice,
    /// A check was skipped because of a tooling fault.
    Warning,
}

/// Diagnostic event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A declared pattern could not be compiled; the pattern check was skipped.
    PatternRejected {
        /// Parameter name.
        parameter: String,
        /// Pattern as declared.
        pattern: String,
        /// Compiler error.
        error: String,
    },
    /// A value was accepted without inspection.
    ValueUnchecked {
        /// Parameter name.
        parameter: String,
        /// Declared type label.
        declared_type: String,
    },
    /// A body schema could not be compiled; the body check was skipped.
    SchemaRejected {
        /// Media type of the body.
        media_type: String,
        /// Compiler error.
        error: String,
    },
}

impl DiagnosticKind {
    /// Returns the severity for this kind.
    #[must_use]
    pub const fn level(&self) -> DiagnosticLevel {
        match self {
            Self::ValueUnchecked {
                ..
            } => DiagnosticLevel::Notice,
            Self::PatternRejected {
                ..
            }
            | Self::SchemaRejected {
                ..
            } => DiagnosticLevel::Warning,
        }
    }
}

/// Timestamped diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEvent {
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Severity.
    pub level: DiagnosticLevel,
    /// Event payload.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl DiagnosticEvent {
    /// Stamps a diagnostic kind with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticKind) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis());
        Self {
            timestamp_ms,
            level: kind.level(),
            kind,
        }
    }
}

// ============================================================================
// SECTION: Diagnostics Sinks
// ============================================================================

/// Diagnostics sink interface.
pub trait DiagnosticsSink: Send + Sync {
    /// Record a diagnostic event.
    fn record(&self, event: &DiagnosticEvent);
}

/// Diagnostics sink that logs JSON lines to stderr.
pub struct StderrDiagnosticsSink;

impl DiagnosticsSink for StderrDiagnosticsSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Diagnostics sink that logs JSON lines to a file.
pub struct FileDiagnosticsSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileDiagnosticsSink {
    /// Opens the diagnostics file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DiagnosticsSink for FileDiagnosticsSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Diagnostics sink that drops all events.
pub struct NoopDiagnosticsSink;

impl DiagnosticsSink for NoopDiagnosticsSink {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// Diagnostics sink that keeps events in memory.
#[derive(Default)]
pub struct MemoryDiagnosticsSink {
    /// Recorded events.
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemoryDiagnosticsSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Returns a snapshot of the recorded event payloads.
    #[must_use]
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.events().into_iter().map(|event| event.kind).collect()
    }
}

impl DiagnosticsSink for MemoryDiagnosticsSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

// ============================================================================
// SECTION: Schema Validators
// ============================================================================

/// Schema validator errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The declared schema cannot be compiled.
    #[error("schema compile error: {0}")]
    Compile(String),
}

/// Body validator selected by media type.
pub trait SchemaValidator: Send + Sync {
    /// Returns true when this validator handles `media_type` (lowercase, no parameters).
    fn supports(&self, media_type: &str) -> bool;

    /// Validates `content` against `schema`, recording violations for `location`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when the schema itself cannot be used; content
    /// that does not conform is recorded in `violations` instead.
    fn validate(
        &self,
        content: &[u8],
        schema: &Value,
        location: &str,
        violations: &mut Violations,
    ) -> Result<(), SchemaError>;
}
