// crates/wirecheck-core/src/runtime/matcher.rs
// ============================================================================
// Module: Wirecheck Variable Matcher
// Description: Matches one URI template against the start of an observed path.
// Purpose: Produce match outcomes and extracted variable bindings.
// Dependencies: crate::core::values, regex
// ============================================================================

//! ## Overview
//! A template such as `/users/{id}` is compiled into an anchored regular
//! expression where literal text is escaped and each `{name}` placeholder
//! captures one non-empty path segment (never `/`). The match consumes a
//! prefix of the path; what remains is the suffix handed to the next level of
//! resolution.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;

use crate::core::values::Values;

// ============================================================================
// SECTION: Match Outcome
// ============================================================================

/// Result of matching a template against an observed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Whether the template matched a prefix of the path.
    matched: bool,
    /// Unconsumed part of the path.
    suffix: String,
    /// Extracted variable bindings.
    variables: Values,
}

impl MatchOutcome {
    /// Outcome for a template that does not match.
    fn no_match() -> Self {
        Self {
            matched: false,
            suffix: String::new(),
            variables: Values::new(),
        }
    }

    /// Returns true when the template matched a prefix of the path.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.matched
    }

    /// Returns true when the template consumed the whole path.
    #[must_use]
    pub const fn is_complete_match(&self) -> bool {
        self.matched && self.suffix.is_empty()
    }

    /// Returns the unconsumed part of the path (empty on no match).
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the extracted variables (empty on no match).
    #[must_use]
    pub const fn variables(&self) -> &Values {
        &self.variables
    }

    /// Returns the number of bound variables.
    #[must_use]
    pub const fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Matches `template` against the start of `path`.
#[must_use]
pub fn match_template(template: &str, path: &str) -> MatchOutcome {
    let Some((regex, names)) = compile_template(template) else {
        return MatchOutcome::no_match();
    };
    let Some(captures) = regex.captures(path) else {
        return MatchOutcome::no_match();
    };
    let consumed = captures.get(0).map_or(0, |whole| whole.end());
    let mut variables = Values::new();
    for (index, name) in names.iter().enumerate() {
        if let Some(value) = captures.get(index + 1) {
            variables.add_value(name.clone(), value.as_str());
        }
    }
    MatchOutcome {
        matched: true,
        suffix: path[consumed ..].to_string(),
        variables,
    }
}

/// Compiles a template into an anchored regex plus placeholder names.
///
/// An unterminated `{` is treated as literal text.
fn compile_template(template: &str) -> Option<(Regex, Vec<String>)> {
    let mut pattern = String::from("^");
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open ..].find('}').map(|offset| open + offset) else {
            break;
        };
        pattern.push_str(&regex::escape(&rest[.. open]));
        pattern.push_str("([^/]+)");
        names.push(rest[open + 1 .. close].to_string());
        rest = &rest[close + 1 ..];
    }
    pattern.push_str(&regex::escape(rest));
    Regex::new(&pattern).ok().map(|regex| (regex, names))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::match_template;

    #[test]
    fn literal_template_matches_exact_path() {
        let outcome = match_template("/users", "/users");
        assert!(outcome.is_complete_match());
        assert_eq!(outcome.variable_count(), 0);
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let outcome = match_template("/a{b", "/a{b");
        assert!(outcome.is_complete_match());
        assert!(!match_template("/a{b", "/ab").is_match());
    }

    #[test]
    fn placeholder_backtracks_before_literal_suffix() {
        let outcome = match_template("/files/{name}.json", "/files/report.v2.json");
        assert!(outcome.is_complete_match());
        assert_eq!(outcome.variables().first("name"), Some("report.v2"));
    }

    #[test]
    fn placeholder_requires_non_empty_segment() {
        assert!(!match_template("/users/{id}", "/users/").is_match());
    }
}
