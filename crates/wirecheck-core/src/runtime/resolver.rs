// crates/wirecheck-core/src/runtime/resolver.rs
// ============================================================================
// Module: Wirecheck Resource Resolver
// Description: Resolves observed paths to the most specific declared resource.
// Purpose: Walk the resource tree and inherit parameters along the ancestor chain.
// Dependencies: crate::core, crate::runtime::matcher
// ============================================================================

//! ## Overview
//! Resolution matches every sibling's relative URI against the observed path,
//! keeps complete matches and partial matches that stop at a `/` boundary,
//! and ranks them by the number of bound variables (fewest first, sibling
//! order on ties). The best candidate wins: a complete match is returned, a
//! partial match commits and descends into its children with the remaining
//! suffix. A failed descent fails the whole resolution; lower-ranked siblings
//! are not retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::Method;
use crate::core::model::ContractModel;
use crate::core::model::ModelError;
use crate::core::model::ResourceId;
use crate::core::parameter::Parameter;
use crate::core::parameter::parameter_by_name;
use crate::core::values::Values;
use crate::runtime::matcher::MatchOutcome;
use crate::runtime::matcher::match_template;

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resource found for an observed path plus the variables bound on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    /// Resolved resource handle.
    pub resource: ResourceId,
    /// Variables bound across every resolution level.
    pub variables: Values,
}

/// Resolves `path` from the contract roots.
#[must_use]
pub fn resolve(contract: &ContractModel, path: &str) -> Option<ResolvedResource> {
    let mut variables = Values::new();
    let resource = find_resource(contract, path, contract.roots(), &mut variables)?;
    Some(ResolvedResource {
        resource,
        variables,
    })
}

/// Finds the best-matching resource among `siblings` for `path`.
///
/// Variables bound by every committed level are appended to `variables`;
/// on failure the entries added so far stay in place.
pub fn find_resource(
    contract: &ContractModel,
    path: &str,
    siblings: &[ResourceId],
    variables: &mut Values,
) -> Option<ResourceId> {
    let mut candidates: Vec<(ResourceId, MatchOutcome)> = siblings
        .iter()
        .filter_map(|&id| {
            let resource = contract.resource(id)?;
            let outcome = match_template(resource.relative_uri(), path);
            let retained = outcome.is_complete_match()
                || (outcome.is_match() && outcome.suffix().starts_with('/'));
            retained.then_some((id, outcome))
        })
        .collect();
    candidates.sort_by_key(|(_, outcome)| outcome.variable_count());

    let (id, outcome) = candidates.into_iter().next()?;
    variables.add_all(outcome.variables());
    if outcome.is_complete_match() {
        return Some(id);
    }
    find_resource(contract, outcome.suffix(), contract.children(id), variables)
}

// ============================================================================
// SECTION: Parameter Inheritance
// ============================================================================

/// Finds the URI parameter `name` on `resource` or its nearest ancestor.
///
/// # Errors
///
/// Returns [`ModelError::AmbiguousParameter`] when the first resource that
/// declares the name declares it more than once.
pub fn find_uri_parameter<'a>(
    contract: &'a ContractModel,
    resource: ResourceId,
    name: &str,
) -> Result<Option<&'a Parameter>, ModelError> {
    for (_, node) in contract.ancestors(resource) {
        if let Some(parameter) = parameter_by_name(node.uri_parameters(), name)? {
            return Ok(Some(parameter));
        }
    }
    Ok(None)
}

/// Returns the base-URI parameters constraining `method` on `resource`.
///
/// Precedence is the method's own parameters, then each resource from
/// `resource` up to the root, then the contract's global parameters. The
/// first parameter seen for a name wins.
#[must_use]
pub fn effective_base_uri_parameters<'a>(
    contract: &'a ContractModel,
    resource: ResourceId,
    method: &'a Method,
) -> Vec<&'a Parameter> {
    let mut seen = BTreeSet::new();
    let mut effective = Vec::new();
    let mut push = |parameter: &'a Parameter| {
        if seen.insert(parameter.name.as_str()) {
            effective.push(parameter);
        }
    };
    method.base_uri_parameters.iter().for_each(&mut push);
    for (_, node) in contract.ancestors(resource) {
        node.base_uri_parameters().iter().for_each(&mut push);
    }
    contract.base_uri_parameters().iter().for_each(&mut push);
    effective
}
