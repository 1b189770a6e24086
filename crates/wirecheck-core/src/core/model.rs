// crates/wirecheck-core/src/core/model.rs
// ============================================================================
// Module: Wirecheck Contract Model
// Description: Arena-backed, immutable resource tree of a declared API.
// Purpose: Provide parent-aware resource lookups without ownership cycles.
// Dependencies: crate::core::{definition, parameter}, serde, thiserror
// ============================================================================

//! ## Overview
//! [`ContractModel`] stores every resource in a flat arena. Children are held
//! as [`ResourceId`] handles and each resource keeps a handle to its parent,
//! so ancestor walks are O(depth) and the tree cannot form cycles. The model
//! is validated once at construction and never mutated afterwards.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::definition::ApiDefinition;
use crate::core::definition::Method;
use crate::core::definition::ResourceDefinition;
use crate::core::parameter::Parameter;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Contract model construction and lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A resource declared an empty relative URI.
    #[error("resource under {parent} has an empty relative uri")]
    EmptyRelativeUri {
        /// Full URI of the parent (`/` for top-level resources).
        parent: String,
    },
    /// A parameter name appears more than once in one declaration list.
    #[error("duplicate parameter {name} in {location}")]
    DuplicateParameter {
        /// Parameter name.
        name: String,
        /// Declaration list that holds the duplicate.
        location: String,
    },
    /// A parameter declares a lower bound above its upper bound.
    #[error("parameter {name} in {location} declares {lower} above {upper}")]
    InvalidBounds {
        /// Parameter name.
        name: String,
        /// Declaration list that holds the parameter.
        location: String,
        /// Rendered lower bound.
        lower: String,
        /// Rendered upper bound.
        upper: String,
    },
    /// A lookup that requires a unique name found several parameters.
    #[error("expected only one parameter with name {0}")]
    AmbiguousParameter(String),
}

// ============================================================================
// SECTION: Resource Arena
// ============================================================================

/// Handle to a resource inside a [`ContractModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(usize);

impl ResourceId {
    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One node of the resource tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    /// URI template relative to the parent.
    relative_uri: String,
    /// Optional display name.
    display_name: Option<String>,
    /// Parent handle; `None` for top-level resources.
    parent: Option<ResourceId>,
    /// Child handles in declaration order.
    children: Vec<ResourceId>,
    /// Declared URI-template parameters.
    uri_parameters: Vec<Parameter>,
    /// Declared base-URI parameters.
    base_uri_parameters: Vec<Parameter>,
    /// Declared methods.
    methods: Vec<Method>,
}

impl Resource {
    /// Returns the relative URI template.
    #[must_use]
    pub fn relative_uri(&self) -> &str {
        &self.relative_uri
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the parent handle.
    #[must_use]
    pub const fn parent(&self) -> Option<ResourceId> {
        self.parent
    }

    /// Returns the child handles.
    #[must_use]
    pub fn children(&self) -> &[ResourceId] {
        &self.children
    }

    /// Returns the declared URI-template parameters.
    #[must_use]
    pub fn uri_parameters(&self) -> &[Parameter] {
        &self.uri_parameters
    }

    /// Returns the declared base-URI parameters.
    #[must_use]
    pub fn base_uri_parameters(&self) -> &[Parameter] {
        &self.base_uri_parameters
    }

    /// Returns the declared methods.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

// ============================================================================
// SECTION: Contract Model
// ============================================================================

/// Immutable, validated contract model.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractModel {
    /// API title.
    title: Option<String>,
    /// API version label.
    version: Option<String>,
    /// Base URI template.
    base_uri: Option<String>,
    /// Global base-URI parameters.
    base_uri_parameters: Vec<Parameter>,
    /// Resource arena.
    resources: Vec<Resource>,
    /// Top-level resource handles.
    roots: Vec<ResourceId>,
}

impl ContractModel {
    /// Builds a validated model from a nested definition.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when a resource has an empty relative URI, a
    /// declaration list repeats a parameter name, or a parameter declares
    /// inverted bounds.
    pub fn from_definition(definition: ApiDefinition) -> Result<Self, ModelError> {
        ensure_parameters_well_formed(&definition.base_uri_parameters, "baseUriParameters")?;
        let mut model = Self {
            title: definition.title,
            version: definition.version,
            base_uri: definition.base_uri,
            base_uri_parameters: definition.base_uri_parameters,
            resources: Vec::new(),
            roots: Vec::new(),
        };
        for resource in definition.resources {
            let id = model.insert(resource, None)?;
            model.roots.push(id);
        }
        Ok(model)
    }

    /// Parses a JSON contract definition and builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::Parse`] when the JSON does not match the
    /// definition shape and [`DefinitionError::Model`] when validation fails.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: ApiDefinition =
            serde_json::from_str(json).map_err(|err| DefinitionError::Parse(err.to_string()))?;
        Self::from_definition(definition).map_err(DefinitionError::Model)
    }

    /// Inserts a resource subtree and returns the handle of its root.
    fn insert(
        &mut self,
        definition: ResourceDefinition,
        parent: Option<ResourceId>,
    ) -> Result<ResourceId, ModelError> {
        let parent_uri = parent.map_or_else(|| "/".to_string(), |id| self.full_uri(id));
        if definition.relative_uri.is_empty() {
            return Err(ModelError::EmptyRelativeUri {
                parent: parent_uri,
            });
        }
        let full_uri = match parent {
            Some(_) => format!("{}{}", parent_uri, definition.relative_uri),
            None => definition.relative_uri.clone(),
        };
        ensure_parameters_well_formed(
            &definition.uri_parameters,
            &format!("{full_uri} uriParameters"),
        )?;
        ensure_parameters_well_formed(
            &definition.base_uri_parameters,
            &format!("{full_uri} baseUriParameters"),
        )?;
        for method in &definition.methods {
            ensure_method_well_formed(method, &full_uri)?;
        }

        let id = ResourceId(self.resources.len());
        self.resources.push(Resource {
            relative_uri: definition.relative_uri,
            display_name: definition.display_name,
            parent,
            children: Vec::new(),
            uri_parameters: definition.uri_parameters,
            base_uri_parameters: definition.base_uri_parameters,
            methods: definition.methods,
        });
        for child in definition.resources {
            let child_id = self.insert(child, Some(id))?;
            if let Some(resource) = self.resources.get_mut(id.0) {
                resource.children.push(child_id);
            }
        }
        Ok(id)
    }

    /// Returns the API title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the API version label.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the base URI template.
    #[must_use]
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    /// Returns the global base-URI parameters.
    #[must_use]
    pub fn base_uri_parameters(&self) -> &[Parameter] {
        &self.base_uri_parameters
    }

    /// Returns the top-level resource handles.
    #[must_use]
    pub fn roots(&self) -> &[ResourceId] {
        &self.roots
    }

    /// Returns the number of resources in the arena.
    #[must_use]
    pub const fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Returns the resource for a handle.
    #[must_use]
    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0)
    }

    /// Returns the child handles of a resource (empty for unknown handles).
    #[must_use]
    pub fn children(&self, id: ResourceId) -> &[ResourceId] {
        self.resource(id).map_or(&[][..], Resource::children)
    }

    /// Returns the parent handle of a resource.
    #[must_use]
    pub fn parent(&self, id: ResourceId) -> Option<ResourceId> {
        self.resource(id).and_then(Resource::parent)
    }

    /// Iterates `id` and then each ancestor up to the root.
    pub fn ancestors(&self, id: ResourceId) -> impl Iterator<Item = (ResourceId, &Resource)> {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let current = next?;
            let resource = self.resource(current)?;
            next = resource.parent;
            Some((current, resource))
        })
    }

    /// Returns the full URI template from the root to `id`.
    #[must_use]
    pub fn full_uri(&self, id: ResourceId) -> String {
        let mut segments: Vec<&str> =
            self.ancestors(id).map(|(_, resource)| resource.relative_uri.as_str()).collect();
        segments.reverse();
        segments.concat()
    }

    /// Returns the methods declared on a resource (empty for unknown handles).
    #[must_use]
    pub fn methods(&self, id: ResourceId) -> &[Method] {
        self.resource(id).map_or(&[][..], Resource::methods)
    }

    /// Returns the declared method on a resource, matching verbs case-insensitively.
    #[must_use]
    pub fn method(&self, id: ResourceId, verb: &str) -> Option<&Method> {
        self.methods(id).iter().find(|method| method.method.eq_ignore_ascii_case(verb))
    }
}

/// Errors raised while loading a contract definition from JSON.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// JSON did not match the definition shape.
    #[error("contract definition parse error: {0}")]
    Parse(String),
    /// Definition parsed but failed model validation.
    #[error("invalid contract definition: {0}")]
    Model(ModelError),
}

// ============================================================================
// SECTION: Validation Helpers
// ============================================================================

/// Validates every parameter list declared on a method.
fn ensure_method_well_formed(method: &Method, full_uri: &str) -> Result<(), ModelError> {
    let label = format!("{} {}", method.method.to_ascii_uppercase(), full_uri);
    ensure_parameters_well_formed(
        &method.base_uri_parameters,
        &format!("{label} baseUriParameters"),
    )?;
    ensure_parameters_well_formed(&method.query_parameters, &format!("{label} queryParameters"))?;
    ensure_parameters_well_formed(&method.headers, &format!("{label} headers"))?;
    for body in &method.body {
        ensure_parameters_well_formed(
            &body.form_parameters,
            &format!("{label} {} formParameters", body.media_type),
        )?;
    }
    for response in &method.responses {
        ensure_parameters_well_formed(
            &response.headers,
            &format!("{label} response {} headers", response.code),
        )?;
    }
    Ok(())
}

/// Ensures unique names and ordered bounds within one declaration list.
fn ensure_parameters_well_formed(
    parameters: &[Parameter],
    location: &str,
) -> Result<(), ModelError> {
    let mut seen = BTreeSet::new();
    for parameter in parameters {
        if !seen.insert(parameter.name.as_str()) {
            return Err(ModelError::DuplicateParameter {
                name: parameter.name.clone(),
                location: location.to_string(),
            });
        }
        if let (Some(minimum), Some(maximum)) = (&parameter.minimum, &parameter.maximum)
            && minimum > maximum
        {
            return Err(ModelError::InvalidBounds {
                name: parameter.name.clone(),
                location: location.to_string(),
                lower: minimum.to_string(),
                upper: maximum.to_string(),
            });
        }
        if let (Some(min_length), Some(max_length)) = (parameter.min_length, parameter.max_length)
            && min_length > max_length
        {
            return Err(ModelError::InvalidBounds {
                name: parameter.name.clone(),
                location: location.to_string(),
                lower: min_length.to_string(),
                upper: max_length.to_string(),
            });
        }
    }
    Ok(())
}
