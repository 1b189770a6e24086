// crates/wirecheck-core/src/runtime/checker.rs
// ============================================================================
// Module: Wirecheck Exchange Checker
// Description: Checks one observed request/response exchange against a contract.
// Purpose: Orchestrate resolution, parameter validation, and body checks into a report.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! [`ContractChecker`] drives one exchange through the contract: the base
//! URI is matched against the declared template, the path is resolved to a
//! resource, the method is looked up, and then URI variables, query values,
//! headers, and bodies are validated. The response status selects the
//! declared response whose headers and body are checked next.
//!
//! Checking always yields a [`Report`]. A contract that turns out to be
//! inconsistent while checking is recorded as `checking.exception` in the
//! contract-validation ledger rather than returned as an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::definition::Body;
use crate::core::definition::Method;
use crate::core::model::ContractModel;
use crate::core::model::ModelError;
use crate::core::report::Report;
use crate::core::values::Values;
use crate::core::violations::ParameterScope;
use crate::core::violations::Violation;
use crate::core::violations::Violations;
use crate::interfaces::DiagnosticEvent;
use crate::interfaces::DiagnosticKind;
use crate::interfaces::DiagnosticsSink;
use crate::interfaces::NoopDiagnosticsSink;
use crate::interfaces::SchemaValidator;
use crate::runtime::matcher::match_template;
use crate::runtime::parameters::ParameterContext;
use crate::runtime::parameters::ParameterValidator;
use crate::runtime::resolver::effective_base_uri_parameters;
use crate::runtime::resolver::find_uri_parameter;
use crate::runtime::resolver::resolve;
use crate::runtime::schema::JsonSchemaValidator;
use crate::runtime::schema::find_schema_validator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Media types whose content is carried as form parameters.
const FORM_MEDIA_TYPES: [&str; 2] = ["application/x-www-form-urlencoded", "multipart/form-data"];

// ============================================================================
// SECTION: Options
// ============================================================================

/// Switches that relax or narrow exchange checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Tolerate query parameters the contract does not declare.
    pub accept_undefined_query: bool,
    /// Tolerate headers the contract does not declare.
    pub accept_undefined_headers: bool,
    /// Tolerate form fields the contract does not declare.
    pub accept_undefined_form: bool,
    /// Drop `X-` prefixed headers before validation.
    pub ignore_x_headers: bool,
    /// Validate response headers.
    pub check_response_headers: bool,
    /// Validate request and response bodies.
    pub check_bodies: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            accept_undefined_query: false,
            accept_undefined_headers: true,
            accept_undefined_form: false,
            ignore_x_headers: false,
            check_response_headers: true,
            check_bodies: true,
        }
    }
}

// ============================================================================
// SECTION: Observed Exchange
// ============================================================================

/// Request as observed on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedRequest {
    /// HTTP method.
    pub method: String,
    /// Base URI the request was sent to, when known.
    pub base_uri: Option<String>,
    /// Path relative to the base URI.
    pub path: String,
    /// Query string values.
    pub query: Values,
    /// Header values.
    pub headers: Values,
    /// Form body values.
    pub form: Values,
    /// `Content-Type` header value.
    pub content_type: Option<String>,
    /// Raw body.
    pub body: Option<Vec<u8>>,
}

impl ObservedRequest {
    /// Creates a request without parameters or body.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the base URI.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Adds a query value.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add_value(name, value);
        self
    }

    /// Adds a header value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add_value(name, value);
        self
    }

    /// Adds a form value.
    #[must_use]
    pub fn with_form(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.add_value(name, value);
        self
    }

    /// Sets the body and its content type.
    #[must_use]
    pub fn with_body(mut self, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.content_type = Some(content_type.into());
        self.body = Some(body.into());
        self
    }
}

/// Response as observed on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedResponse {
    /// Status code.
    pub status: u16,
    /// Header values.
    pub headers: Values,
    /// `Content-Type` header value.
    pub content_type: Option<String>,
    /// Raw body.
    pub body: Option<Vec<u8>>,
}

impl ObservedResponse {
    /// Creates a response without headers or body.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Adds a header value.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add_value(name, value);
        self
    }

    /// Sets the body and its content type.
    #[must_use]
    pub fn with_body(mut self, content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.content_type = Some(content_type.into());
        self.body = Some(body.into());
        self
    }
}

/// Content of one message side handed to body checking.
struct Content<'a> {
    /// Declared content type.
    content_type: Option<&'a str>,
    /// Raw bytes.
    body: Option<&'a [u8]>,
    /// Form fields (requests only).
    form: Option<&'a Values>,
}

impl Content<'_> {
    /// Returns true when the message carries any content.
    fn is_present(&self) -> bool {
        self.body.is_some_and(|body| !body.is_empty())
            || self.form.is_some_and(|form| !form.is_empty())
    }
}

// ============================================================================
// SECTION: Checker
// ============================================================================

/// Checks observed exchanges against one shared contract.
#[derive(Clone)]
pub struct ContractChecker {
    /// Contract to check against.
    contract: Arc<ContractModel>,
    /// Checking switches.
    options: CheckOptions,
    /// Sink for tooling diagnostics.
    diagnostics: Arc<dyn DiagnosticsSink>,
    /// Body validators in selection order.
    schema_validators: Vec<Arc<dyn SchemaValidator>>,
}

impl ContractChecker {
    /// Creates a checker with default options, no diagnostics output, and the
    /// JSON schema validator.
    #[must_use]
    pub fn new(contract: Arc<ContractModel>) -> Self {
        Self {
            contract,
            options: CheckOptions::default(),
            diagnostics: Arc::new(NoopDiagnosticsSink),
            schema_validators: vec![Arc::new(JsonSchemaValidator::new())],
        }
    }

    /// Replaces the checking switches.
    #[must_use]
    pub const fn with_options(mut self, options: CheckOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Adds a schema validator ahead of the ones already registered.
    #[must_use]
    pub fn with_schema_validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.schema_validators.insert(0, validator);
        self
    }

    /// Returns the contract.
    #[must_use]
    pub fn contract(&self) -> &ContractModel {
        &self.contract
    }

    /// Returns the checking switches.
    #[must_use]
    pub const fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Checks a request and, when given, its response.
    #[must_use]
    pub fn check(&self, request: &ObservedRequest, response: Option<&ObservedResponse>) -> Report {
        let mut report = Report::new(Arc::clone(&self.contract));
        if let Err(err) = self.check_exchange(request, response, &mut report) {
            report.record_error(&err);
        }
        report
    }

    /// Checks a request on its own.
    #[must_use]
    pub fn check_request(&self, request: &ObservedRequest) -> Report {
        self.check(request, None)
    }

    /// Runs every exchange step, stopping early when the request cannot be placed.
    fn check_exchange(
        &self,
        request: &ObservedRequest,
        response: Option<&ObservedResponse>,
        report: &mut Report,
    ) -> Result<(), ModelError> {
        let contract = self.contract.as_ref();
        let mut base_uri_variables = Values::new();
        if let Some(template) = contract.base_uri()
            && let Some(base_uri) = request.base_uri.as_deref()
        {
            let outcome = match_template(template, base_uri);
            if outcome.is_complete_match() {
                base_uri_variables = outcome.variables().clone();
            } else {
                report.request_violations_mut().add(Violation::BaseUriUnmatched {
                    base_uri: base_uri.to_string(),
                    template: template.to_string(),
                });
            }
        }

        let Some(resolved) = resolve(contract, &request.path) else {
            report.request_violations_mut().add(Violation::ResourceUndefined {
                path: request.path.clone(),
            });
            return Ok(());
        };
        let Some(method) = contract.method(resolved.resource, &request.method) else {
            report.request_violations_mut().add(Violation::ActionUndefined {
                method: request.method.to_uppercase(),
                resource: contract.full_uri(resolved.resource),
            });
            return Ok(());
        };
        let location =
            format!("{} {}", request.method.to_uppercase(), contract.full_uri(resolved.resource));

        let diagnostics = self.diagnostics.as_ref();
        let mut contract_findings = Violations::new();
        {
            let ledger = report.request_violations_mut();
            if !base_uri_variables.is_empty() {
                let declared = effective_base_uri_parameters(contract, resolved.resource, method);
                let context = ParameterContext::new(ParameterScope::BaseUri).at(location.as_str());
                ParameterValidator::new(ledger, diagnostics)
                    .accept_undefined(true)
                    .validate_parameters(&context, &declared, &base_uri_variables);
            }

            let context = ParameterContext::new(ParameterScope::Uri).at(location.as_str());
            let mut validator = ParameterValidator::new(ledger, diagnostics);
            for (name, values) in resolved.variables.iter() {
                if let Some(parameter) = find_uri_parameter(contract, resolved.resource, name)? {
                    for value in values {
                        validator.validate_parameter(&context, parameter, value);
                    }
                }
            }

            let context = ParameterContext::new(ParameterScope::Query).at(location.as_str());
            ParameterValidator::new(ledger, diagnostics)
                .accept_undefined(self.options.accept_undefined_query)
                .validate_parameters(&context, &method.query_parameters, &request.query);

            let headers = self.observed_headers(&request.headers);
            let context = ParameterContext::new(ParameterScope::Header).at(location.as_str());
            ParameterValidator::new(ledger, diagnostics)
                .accept_undefined(self.options.accept_undefined_headers)
                .validate_parameters(&context, &method.headers, &headers);

            if self.options.check_bodies {
                let content = Content {
                    content_type: request.content_type.as_deref(),
                    body: request.body.as_deref(),
                    form: Some(&request.form),
                };
                self.check_body(&method.body, &content, &location, ledger, &mut contract_findings);
            }
        }

        if let Some(response) = response {
            self.check_response(
                method,
                response,
                &location,
                report.response_violations_mut(),
                &mut contract_findings,
            );
        }
        report.validation_violations_mut().add_all(&contract_findings);
        Ok(())
    }

    /// Checks the response status, headers, and body.
    fn check_response(
        &self,
        method: &Method,
        response: &ObservedResponse,
        location: &str,
        ledger: &mut Violations,
        contract_findings: &mut Violations,
    ) {
        let code = response.status.to_string();
        let Some(declared) = method.response(&code) else {
            ledger.add(Violation::ResponseCodeUndefined {
                location: location.to_string(),
                code,
            });
            return;
        };
        let location = format!("{location} -> {code}");
        if self.options.check_response_headers {
            let headers = self.observed_headers(&response.headers);
            let context = ParameterContext::new(ParameterScope::Header).at(location.as_str());
            ParameterValidator::new(ledger, self.diagnostics.as_ref())
                .accept_undefined(self.options.accept_undefined_headers)
                .validate_parameters(&context, &declared.headers, &headers);
        }
        if self.options.check_bodies {
            let content = Content {
                content_type: response.content_type.as_deref(),
                body: response.body.as_deref(),
                form: None,
            };
            self.check_body(&declared.body, &content, &location, ledger, contract_findings);
        }
    }

    /// Checks one message body against the declared bodies.
    fn check_body(
        &self,
        declared: &[Body],
        content: &Content<'_>,
        location: &str,
        ledger: &mut Violations,
        contract_findings: &mut Violations,
    ) {
        if !content.is_present() {
            return;
        }
        if declared.is_empty() {
            ledger.add(Violation::BodySuperfluous {
                location: location.to_string(),
            });
            return;
        }
        let media_type = content.content_type.map(media_type_essence).unwrap_or_default();
        let matching = declared.iter().find(|body| media_type_essence(&body.media_type) == media_type);
        let Some(body) = matching else {
            ledger.add(Violation::MediaTypeUndefined {
                location: location.to_string(),
                media_type,
            });
            return;
        };

        if FORM_MEDIA_TYPES.contains(&media_type.as_str()) {
            if let Some(form) = content.form {
                let context = ParameterContext::new(ParameterScope::Form).at(location);
                ParameterValidator::new(ledger, self.diagnostics.as_ref())
                    .accept_undefined(self.options.accept_undefined_form)
                    .validate_parameters(&context, &body.form_parameters, form);
            }
            return;
        }

        let (Some(schema), Some(bytes)) = (&body.schema, content.body) else {
            return;
        };
        let Some(validator) = find_schema_validator(&self.schema_validators, &media_type) else {
            return;
        };
        if let Err(err) = validator.validate(bytes, schema, location, ledger) {
            self.diagnostics.record(&DiagnosticEvent::new(DiagnosticKind::SchemaRejected {
                media_type: media_type.clone(),
                error: err.to_string(),
            }));
            contract_findings.add(Violation::SchemaInvalid {
                location: location.to_string(),
                detail: err.to_string(),
            });
        }
    }

    /// Returns the headers subject to validation.
    fn observed_headers(&self, headers: &Values) -> Values {
        if self.options.ignore_x_headers {
            headers.filtered(|name| !is_extension_header(name))
        } else {
            headers.clone()
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the lowercase media type without parameters (`text/html; q=1` -> `text/html`).
#[must_use]
pub fn media_type_essence(content_type: &str) -> String {
    content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Returns true for `X-` prefixed header names.
fn is_extension_header(name: &str) -> bool {
    name.get(.. 2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("x-"))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::is_extension_header;
    use super::media_type_essence;

    #[test]
    fn essence_drops_parameters_and_case() {
        assert_eq!(media_type_essence("Application/JSON; charset=utf-8"), "application/json");
        assert_eq!(media_type_essence(""), "");
    }

    #[test]
    fn extension_headers_are_detected_case_insensitively() {
        assert!(is_extension_header("X-Trace"));
        assert!(is_extension_header("x-request-id"));
        assert!(!is_extension_header("Accept"));
        assert!(!is_extension_header("X"));
    }
}
