// crates/wirecheck-core/src/runtime/pattern.rs
// ============================================================================
// Module: Wirecheck Pattern Dialect
// Description: Normalizes declared parameter patterns into native regexes.
// Purpose: Accept quoted and `/body/flags` pattern forms from contract documents.
// Dependencies: regex
// ============================================================================

//! ## Overview
//! Contract documents write patterns in several dialects: bare (`^a+$`),
//! quoted (`'^a+$'` or `"^a+$"`), or delimited with trailing flags
//! (`/^a+$/i`). Normalization strips the quotes, unwraps the delimiter form
//! when the closing `/` sits within the last three characters, unescapes
//! `\/` inside the body, and maps the `i` flag to case-insensitive matching.
//! Compiled patterns must match the whole value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use regex::Regex;
use regex::RegexBuilder;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Declared pattern rewritten for the native regex engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedPattern {
    /// Pattern body without quotes or delimiters.
    pub source: String,
    /// Whether the `i` flag was present.
    pub case_insensitive: bool,
}

/// Normalizes a declared pattern.
#[must_use]
pub fn normalize_pattern(raw: &str) -> NormalizedPattern {
    let unquoted = strip_quotes(raw);
    if unquoted.starts_with('/')
        && let Some(close) = unquoted.rfind('/')
        && close > 0
        && close + 3 >= unquoted.len()
    {
        return NormalizedPattern {
            source: unquoted[1 .. close].replace("\\/", "/"),
            case_insensitive: unquoted[close + 1 ..].contains('i'),
        };
    }
    NormalizedPattern {
        source: unquoted.to_string(),
        case_insensitive: false,
    }
}

/// Compiles a declared pattern into an anchored, whole-value regex.
///
/// # Errors
///
/// Returns [`regex::Error`] when the normalized pattern is not valid syntax
/// for the native engine.
pub fn compile_pattern(raw: &str) -> Result<Regex, regex::Error> {
    let normalized = normalize_pattern(raw);
    RegexBuilder::new(&format!("^(?:{})$", normalized.source))
        .case_insensitive(normalized.case_insensitive)
        .build()
}

/// Removes one pair of matching surrounding quotes.
fn strip_quotes(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if raw.len() >= 2
            && let Some(inner) = raw.strip_prefix(quote).and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

// ============================================================================
// SECTION: Tests
// ============================================================================
