// crates/wirecheck-config/src/config.rs
// ============================================================================
// Module: Wirecheck Configuration
// Description: Configuration loading and validation for Wirecheck.
// Purpose: Provide strict config parsing with hard limits and build runtime settings.
// Dependencies: wirecheck-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Unknown keys are rejected. A loaded configuration yields the
//! [`CheckOptions`] used by the exchange checker and the configured
//! [`DiagnosticsSink`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use wirecheck_core::CheckOptions;
use wirecheck_core::ContractChecker;
use wirecheck_core::ContractModel;
use wirecheck_core::DiagnosticsSink;
use wirecheck_core::FileDiagnosticsSink;
use wirecheck_core::NoopDiagnosticsSink;
use wirecheck_core::StderrDiagnosticsSink;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "wirecheck.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "WIRECHECK_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Wirecheck configuration loaded from `wirecheck.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WirecheckConfig {
    /// Exchange checking switches.
    #[serde(default)]
    pub checks: ChecksConfig,
    /// Diagnostics output.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl WirecheckConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.diagnostics.validate()
    }

    /// Returns the checker switches.
    #[must_use]
    pub const fn check_options(&self) -> CheckOptions {
        self.checks.to_options()
    }

    /// Builds the configured diagnostics sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the diagnostics file cannot be opened.
    pub fn build_diagnostics_sink(&self) -> Result<Arc<dyn DiagnosticsSink>, ConfigError> {
        self.diagnostics.build_sink()
    }

    /// Builds an exchange checker for `contract` with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the diagnostics sink cannot be built.
    pub fn build_checker(
        &self,
        contract: Arc<ContractModel>,
    ) -> Result<ContractChecker, ConfigError> {
        let diagnostics = self.build_diagnostics_sink()?;
        Ok(ContractChecker::new(contract)
            .with_options(self.check_options())
            .with_diagnostics(diagnostics))
    }
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Exchange checking switches (`[checks]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChecksConfig {
    /// Tolerate undeclared query parameters.
    #[serde(default)]
    pub accept_undefined_query: bool,
    /// Tolerate undeclared headers.
    #[serde(default = "default_true")]
    pub accept_undefined_headers: bool,
    /// Tolerate undeclared form fields.
    #[serde(default)]
    pub accept_undefined_form: bool,
    /// Drop `X-` prefixed headers before validation.
    #[serde(default)]
    pub ignore_x_headers: bool,
    /// Validate response headers.
    #[serde(default = "default_true")]
    pub check_response_headers: bool,
    /// Validate request and response bodies.
    #[serde(default = "default_true")]
    pub check_bodies: bool,
}

impl ChecksConfig {
    /// Converts the section into checker switches.
    #[must_use]
    pub const fn to_options(self) -> CheckOptions {
        CheckOptions {
            accept_undefined_query: self.accept_undefined_query,
            accept_undefined_headers: self.accept_undefined_headers,
            accept_undefined_form: self.accept_undefined_form,
            ignore_x_headers: self.ignore_x_headers,
            check_response_headers: self.check_response_headers,
            check_bodies: self.check_bodies,
        }
    }
}

impl Default for ChecksConfig {
    fn default() -> Self {
        let options = CheckOptions::default();
        Self {
            accept_undefined_query: options.accept_undefined_query,
            accept_undefined_headers: options.accept_undefined_headers,
            accept_undefined_form: options.accept_undefined_form,
            ignore_x_headers: options.ignore_x_headers,
            check_response_headers: options.check_response_headers,
            check_bodies: options.check_bodies,
        }
    }
}

// ============================================================================
// SECTION: Diagnostics
// ============================================================================

/// Diagnostics sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `path`.
    File,
    /// Drop all diagnostics.
    None,
}

/// Diagnostics output (`[diagnostics]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsConfig {
    /// Sink selection.
    #[serde(default)]
    pub sink: DiagnosticsSinkKind,
    /// Output file for the `file` sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl DiagnosticsConfig {
    /// Validates the diagnostics section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the sink and path disagree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (DiagnosticsSinkKind::File, Some(path)) => {
                validate_path_string("diagnostics.path", path)
            }
            (DiagnosticsSinkKind::File, None) => Err(missing_file_path()),
            (DiagnosticsSinkKind::Stderr | DiagnosticsSinkKind::None, Some(_)) => {
                Err(ConfigError::Invalid(
                    "diagnostics.path is only valid when sink = \"file\"".to_string(),
                ))
            }
            (DiagnosticsSinkKind::Stderr | DiagnosticsSinkKind::None, None) => Ok(()),
        }
    }

    /// Builds the configured sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the diagnostics file cannot be opened.
    pub fn build_sink(&self) -> Result<Arc<dyn DiagnosticsSink>, ConfigError> {
        match self.sink {
            DiagnosticsSinkKind::Stderr => Ok(Arc::new(StderrDiagnosticsSink)),
            DiagnosticsSinkKind::None => Ok(Arc::new(NoopDiagnosticsSink)),
            DiagnosticsSinkKind::File => {
                let path = self.path.as_deref().ok_or_else(missing_file_path)?;
                let sink = FileDiagnosticsSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Error for a `file` sink declared without a path.
fn missing_file_path() -> ConfigError {
    ConfigError::Invalid("diagnostics.path is required when sink = \"file\"".to_string())
}

/// Serde default for switches that are on unless disabled.
const fn default_true() -> bool {
    true
}

/// Resolves the config path: explicit argument, then `WIRECHECK_CONFIG`, then `wirecheck.toml`.
///
/// An environment value longer than the total path limit is rejected before use.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
///
/// The same limits bound `diagnostics.path` (see [`validate_path_string`]), so
/// every path the config names is checked alike.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
