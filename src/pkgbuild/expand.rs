// src/pkgbuild/expand.rs

//! Indirect ("eval") expansion
//!
//! A key carrying an `eval ` marker names a template: its value embeds
//! `{$name}` references to another field whose value is a comma- or
//! space-separated list. Expansion stamps out the text surrounding the
//! reference once per list element, in list order, then keeps scanning
//! the grown value for further references.
//!
//! Because expanded text is rescanned, a reference cycle can grow a
//! value forever; every loop here draws from one shared step budget and
//! bails out with [`MetadataError::ExpansionOverflow`] when it runs dry.

use crate::error::MetadataError;
use crate::pkgbuild::fields::FieldMap;
use regex::{NoExpand, Regex};
use std::sync::LazyLock;
use tracing::debug;

// {$name}, {${name} and {$name}} are all tolerated; the brace captures
// feed the per-occurrence replacement pattern below.
static EVAL_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\$(\{?)(\w+)(\}?)\}").unwrap());

const EVAL_MARKER: &str = "eval ";

/// Split a list-valued field into its pieces. Commas and spaces both
/// separate; an empty or missing value still yields one empty piece so
/// the surrounding template text survives.
fn split_list(value: &str) -> Vec<&str> {
    let pieces: Vec<&str> = value
        .split([',', ' '])
        .filter(|p| !p.is_empty())
        .collect();
    if pieces.is_empty() { vec![""] } else { pieces }
}

/// Expand one template value against `fields`, spending from `budget`.
fn expand_value(
    key: &str,
    mut value: String,
    fields: &FieldMap,
    budget: &mut usize,
) -> Result<String, MetadataError> {
    while let Some(caps) = EVAL_REF_RE.captures(&value) {
        if *budget == 0 {
            return Err(MetadataError::ExpansionOverflow(key.to_string()));
        }
        *budget -= 1;

        let (open, name, close) = (&caps[1], &caps[2], &caps[3]);
        let pieces = split_list(fields.get(name).unwrap_or(""));

        // Non-greedy prefix keeps the order of multiple references on
        // one value intact: each occurrence is rewritten on its own.
        let occurrence = Regex::new(&format!(
            r"(\S*?)\{{\${}{}{}\}}(\S*)",
            regex::escape(open),
            name,
            regex::escape(close),
        ))
        .expect("escaped occurrence pattern is valid");

        while let Some(reps) = occurrence.captures(&value) {
            if *budget == 0 {
                return Err(MetadataError::ExpansionOverflow(key.to_string()));
            }
            *budget -= 1;

            let (prefix, suffix) = (&reps[1], &reps[2]);
            let mut replacement = String::new();
            for piece in &pieces {
                replacement.push_str(prefix);
                replacement.push_str(piece);
                replacement.push_str(suffix);
                replacement.push(' ');
            }
            value = occurrence
                .replacen(&value, 1, NoExpand(&replacement))
                .into_owned();
        }
    }

    Ok(value.trim_end().to_string())
}

/// Resolve every eval directive in `fields`, renaming the directive key
/// to its real name; plain entries pass through unchanged.
pub fn expand_eval_directives(
    fields: &FieldMap,
    max_steps: usize,
) -> Result<FieldMap, MetadataError> {
    let mut expanded = FieldMap::new();

    for (key, value) in fields.iter() {
        if key.contains(EVAL_MARKER) {
            let real_key = key.replace(EVAL_MARKER, "");
            let mut budget = max_steps;
            let new_value = expand_value(&real_key, value.to_string(), fields, &mut budget)?;
            debug!("expanded eval directive {} -> {}", real_key, new_value);
            expanded.insert(real_key, new_value);
        } else {
            expanded.insert(key, value);
        }
    }

    Ok(expanded)
}
