// src/pkgbuild/mod.rs

//! PKGBUILD metadata extraction pipeline
//!
//! Turns raw recipe text into a flat map of metadata fields the
//! submission workflow stores or displays. The pipeline is a pure
//! function over the text and runs each stage exactly once:
//!
//! 1. normalize physical lines into logical lines ([`lines`])
//! 2. collect `key=value` assignments and the `build()` marker
//!    ([`assign`])
//! 3. check the mandatory fields ([`validate`])
//! 4. expand indirect `eval ` templates ([`expand`])
//! 5. substitute `$name` references ([`subst`])
//!
//! Recipes are untrusted uploads: every failure mode, including
//! runaway expansion, comes back as an error value inside
//! [`Extraction`], never a panic.

pub mod assign;
pub mod expand;
pub mod fields;
pub mod lines;
pub mod subst;
pub mod validate;

use crate::error::MetadataError;
use fields::FieldMap;
use tracing::debug;

/// Knobs for a single extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Combined iteration budget for the expansion and substitution
    /// loops of a single value; exceeding it yields
    /// [`MetadataError::ExpansionOverflow`].
    pub max_expansion_steps: usize,
    /// Collect logical lines that matched neither an assignment nor
    /// the build marker. Off by default; the permissive parse ignores
    /// them silently.
    pub collect_ignored: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_expansion_steps: 1000,
            collect_ignored: false,
        }
    }
}

/// Result of one extraction run.
///
/// On failure `fields` is empty and `error` names the reason; callers
/// surface it verbatim and stop processing the submission.
#[derive(Debug, Default)]
pub struct Extraction {
    pub fields: FieldMap,
    pub error: Option<MetadataError>,
    pub ignored_lines: Vec<String>,
}

impl Extraction {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }

    fn failed(error: MetadataError, ignored_lines: Vec<String>) -> Self {
        Self {
            fields: FieldMap::new(),
            error: Some(error),
            ignored_lines,
        }
    }
}

/// Extract metadata fields from recipe text with default options.
pub fn extract_metadata(content: &str) -> Extraction {
    extract_metadata_with(content, &ExtractOptions::default())
}

/// Extract metadata fields from recipe text.
pub fn extract_metadata_with(content: &str, opts: &ExtractOptions) -> Extraction {
    let logical = lines::normalize_lines(content);
    let scan = assign::scan_assignments(&logical, opts.collect_ignored);

    if let Err(error) = validate::validate_required(&scan) {
        debug!("recipe rejected: {}", error);
        return Extraction::failed(error, scan.ignored_lines);
    }

    let expanded = match expand::expand_eval_directives(&scan.fields, opts.max_expansion_steps) {
        Ok(map) => map,
        Err(error) => return Extraction::failed(error, scan.ignored_lines),
    };

    let fields = match subst::substitute_variables(&expanded, opts.max_expansion_steps) {
        Ok(map) => map,
        Err(error) => return Extraction::failed(error, scan.ignored_lines),
    };

    debug!("extracted {} fields from recipe", fields.len());
    Extraction {
        fields,
        error: None,
        ignored_lines: scan.ignored_lines,
    }
}
