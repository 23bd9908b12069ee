// src/pkgbuild/subst.rs

//! Variable substitution
//!
//! One left-to-right pass per value replaces `$name` / `${name}`
//! references with the first space-delimited token of the referenced
//! entry. The scan resumes immediately after each inserted replacement
//! and never restarts, so substituted text is not re-expanded within
//! the pass. References resolve against the entries already finalized
//! when the current one is reached; self-references and unknown names
//! become the empty string.

use crate::error::MetadataError;
use crate::pkgbuild::fields::FieldMap;
use regex::Regex;
use std::sync::LazyLock;

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\{?)([_\w]+)(\}?)").unwrap());

/// First space-delimited token of a value. Single-valued fields like
/// `pkgver` are stored as flattened lists, so a reference picks the
/// first element only.
fn first_token(value: &str) -> &str {
    value.split(' ').next().unwrap_or("")
}

/// Substitute `$name` references in every value, in map order.
pub fn substitute_variables(
    fields: &FieldMap,
    max_steps: usize,
) -> Result<FieldMap, MetadataError> {
    let mut out = FieldMap::new();

    for (key, value) in fields.iter() {
        let mut v = value.to_string();
        let mut offset = 0;
        let mut budget = max_steps;

        while offset < v.len() {
            let Some(m) = VAR_RE.captures(&v[offset..]) else {
                break;
            };
            if budget == 0 {
                return Err(MetadataError::ExpansionOverflow(key.to_string()));
            }
            budget -= 1;

            let span = m.get(0).expect("match always has a full capture");
            let (start, end) = (offset + span.start(), offset + span.end());
            let name = &m[2];

            let replacement = if name == key {
                ""
            } else {
                out.get(name).map(first_token).unwrap_or("")
            };

            v.replace_range(start..end, replacement);
            offset = start + replacement.len();
        }

        out.insert(key, v);
    }

    Ok(out)
}
