// crates/wirecheck-core/src/core/definition.rs
// ============================================================================
// Module: Wirecheck Contract Definitions
// Description: Serializable contract definition tree (API, resources, methods).
// Purpose: Let hosts describe an already-parsed contract as plain data.
// Dependencies: crate::core::parameter, serde, serde_json
// ============================================================================

//! ## Overview
//! Definitions are the nested, owned form of a contract as a host hands it
//! over (in code or as JSON). [`crate::core::model::ContractModel`] flattens
//! them into an arena with parent handles before any traffic is checked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::parameter::Parameter;

// ============================================================================
// SECTION: API Definition
// ============================================================================

/// Root of a contract definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApiDefinition {
    /// API title.
    #[serde(default)]
    pub title: Option<String>,
    /// API version label.
    #[serde(default)]
    pub version: Option<String>,
    /// Base URI template (`https://{host}/v1`).
    #[serde(default)]
    pub base_uri: Option<String>,
    /// Global base-URI parameters.
    #[serde(default)]
    pub base_uri_parameters: Vec<Parameter>,
    /// Top-level resources.
    #[serde(default)]
    pub resources: Vec<ResourceDefinition>,
}

impl ApiDefinition {
    /// Creates an empty definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URI template.
    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Adds a global base-URI parameter.
    #[must_use]
    pub fn with_base_uri_parameter(mut self, parameter: Parameter) -> Self {
        self.base_uri_parameters.push(parameter);
        self
    }

    /// Adds a top-level resource.
    #[must_use]
    pub fn with_resource(mut self, resource: ResourceDefinition) -> Self {
        self.resources.push(resource);
        self
    }
}

// ============================================================================
// SECTION: Resource Definition
// ============================================================================

/// Nested resource definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResourceDefinition {
    /// URI template relative to the parent (`/users`, `/{id}`).
    pub relative_uri: String,
    /// Optional display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Declared URI-template parameters.
    #[serde(default)]
    pub uri_parameters: Vec<Parameter>,
    /// Declared base-URI parameters.
    #[serde(default)]
    pub base_uri_parameters: Vec<Parameter>,
    /// Declared methods.
    #[serde(default)]
    pub methods: Vec<Method>,
    /// Child resources.
    #[serde(default)]
    pub resources: Vec<Self>,
}

impl ResourceDefinition {
    /// Creates a resource with no parameters, methods, or children.
    #[must_use]
    pub fn new(relative_uri: impl Into<String>) -> Self {
        Self {
            relative_uri: relative_uri.into(),
            display_name: None,
            uri_parameters: Vec::new(),
            base_uri_parameters: Vec::new(),
            methods: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Adds a URI-template parameter.
    #[must_use]
    pub fn with_uri_parameter(mut self, parameter: Parameter) -> Self {
        self.uri_parameters.push(parameter);
        self
    }

    /// Adds a base-URI parameter.
    #[must_use]
    pub fn with_base_uri_parameter(mut self, parameter: Parameter) -> Self {
        self.base_uri_parameters.push(parameter);
        self
    }

    /// Adds a method.
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a child resource.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.resources.push(child);
        self
    }
}

// ============================================================================
// SECTION: Methods, Responses, Bodies
// ============================================================================

/// Declared HTTP method on a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Method {
    /// HTTP verb (`get`, `post`, ...).
    pub method: String,
    /// Method-level base-URI parameters.
    #[serde(default)]
    pub base_uri_parameters: Vec<Parameter>,
    /// Declared query parameters.
    #[serde(default)]
    pub query_parameters: Vec<Parameter>,
    /// Declared request headers.
    #[serde(default)]
    pub headers: Vec<Parameter>,
    /// Declared request bodies by media type.
    #[serde(default)]
    pub body: Vec<Body>,
    /// Declared responses.
    #[serde(default)]
    pub responses: Vec<Response>,
}

impl Method {
    /// Creates a method with no declarations.
    #[must_use]
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            method: verb.into(),
            base_uri_parameters: Vec::new(),
            query_parameters: Vec::new(),
            headers: Vec::new(),
            body: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// Adds a base-URI parameter.
    #[must_use]
    pub fn with_base_uri_parameter(mut self, parameter: Parameter) -> Self {
        self.base_uri_parameters.push(parameter);
        self
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query_parameter(mut self, parameter: Parameter) -> Self {
        self.query_parameters.push(parameter);
        self
    }

    /// Adds a request header.
    #[must_use]
    pub fn with_header(mut self, parameter: Parameter) -> Self {
        self.headers.push(parameter);
        self
    }

    /// Adds a request body.
    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body.push(body);
        self
    }

    /// Adds a response.
    #[must_use]
    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    /// Returns the declared response for a status code.
    #[must_use]
    pub fn response(&self, code: &str) -> Option<&Response> {
        self.responses.iter().find(|response| response.code == code)
    }
}

/// Declared response for one status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Response {
    /// Status code as declared (`200`).
    pub code: String,
    /// Declared response headers.
    #[serde(default)]
    pub headers: Vec<Parameter>,
    /// Declared response bodies by media type.
    #[serde(default)]
    pub body: Vec<Body>,
}

impl Response {
    /// Creates a response with no headers or bodies.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a response header.
    #[must_use]
    pub fn with_header(mut self, parameter: Parameter) -> Self {
        self.headers.push(parameter);
        self
    }

    /// Adds a response body.
    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body.push(body);
        self
    }
}

/// Declared body for one media type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Body {
    /// Media type (`application/json`).
    pub media_type: String,
    /// Optional schema; a JSON string is parsed before use.
    #[serde(default)]
    pub schema: Option<Value>,
    /// Declared form parameters for form media types.
    #[serde(default)]
    pub form_parameters: Vec<Parameter>,
}

impl Body {
    /// Creates a body declaration without schema or form parameters.
    #[must_use]
    pub fn new(media_type: impl Into<String>) -> Self {
        Self {
            media_type: media_type.into(),
            schema: None,
            form_parameters: Vec::new(),
        }
    }

    /// Sets the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Adds a form parameter.
    #[must_use]
    pub fn with_form_parameter(mut self, parameter: Parameter) -> Self {
        self.form_parameters.push(parameter);
        self
    }
}
