// src/pkgbuild/assign.rs

//! Assignment extraction
//!
//! Scans logical lines for `key=value` statements and collects them
//! into a [`FieldMap`], while watching for the `build()` function
//! marker. Lines that are neither are ignored without error; the
//! permissive behavior is intentional, but a diagnostic caller can ask
//! for the list of ignored lines.
//!
//! Quoting is handled per-field: `pkgname` and `pkgdesc` keep their
//! value verbatim except for one fully-matching outer quote pair, every
//! other field has all parens and quotes removed, which flattens array
//! literals into a space-joined token list.

use crate::pkgbuild::fields::FieldMap;
use crate::pkgbuild::lines::LogicalLine;
use regex::Regex;
use std::sync::LazyLock;

// `eval ` is admitted as a key prefix so indirect-expansion directives
// land in the map with their marker intact.
static ASSIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:eval )?[_\w]+=[^=].*").unwrap());

static PARAM_DEFAULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+)#(\w*)\}?").unwrap());

static BUILD_FN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"build.*\(\)").unwrap());

/// Fields whose value keeps inner quoting and only sheds one outer pair.
const VERBATIM_FIELDS: [&str; 2] = ["pkgname", "pkgdesc"];

/// Output of the assignment scan.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub fields: FieldMap,
    pub saw_build_function: bool,
    /// Non-empty lines that matched neither pattern; only filled when
    /// the caller asked for diagnostics.
    pub ignored_lines: Vec<String>,
}

/// Strip one matching pair of outer `"` or `'` quotes, if both ends
/// carry the same quote character.
fn strip_matching_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[bytes.len() - 1] == bytes[0]
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Flatten array-literal syntax: drop every paren and quote character.
fn strip_array_syntax(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '"' | '\''))
        .collect()
}

/// Collect `key=value` assignments and the build-function marker.
pub fn scan_assignments(lines: &[LogicalLine], collect_ignored: bool) -> ScanResult {
    let mut result = ScanResult::default();

    for line in lines {
        // Neutralize ${name#default} parameter substitution before the
        // assignment test; it is a pure text rewrite, nothing runs.
        let text = PARAM_DEFAULT_RE.replace_all(&line.text, "${1}${2}");

        if ASSIGN_RE.is_match(&text) {
            let (key, value) = text
                .split_once('=')
                .expect("assignment pattern guarantees an equals sign");
            let value = if VERBATIM_FIELDS.contains(&key) {
                strip_matching_quotes(value).to_string()
            } else {
                strip_array_syntax(value)
            };
            result.fields.insert(key, value);
        } else if BUILD_FN_RE.is_match(&text) {
            result.saw_build_function = true;
        } else if collect_ignored && !text.is_empty() {
            result.ignored_lines.push(text.into_owned());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkgbuild::lines::normalize_lines;

    fn scan(content: &str) -> ScanResult {
        scan_assignments(&normalize_lines(content), false)
    }

    #[test]
    fn test_simple_assignment() {
        let result = scan("pkgver=1.0");
        assert_eq!(result.fields.get("pkgver"), Some("1.0"));
    }

    #[test]
    fn test_pkgdesc_outer_quotes_stripped() {
        assert_eq!(
            scan("pkgdesc=\"a tool\"").fields.get("pkgdesc"),
            Some("a tool")
        );
        assert_eq!(
            scan("pkgdesc='a tool'").fields.get("pkgdesc"),
            Some("a tool")
        );
        assert_eq!(scan("pkgdesc=a tool").fields.get("pkgdesc"), Some("a tool"));
    }

    #[test]
    fn test_pkgdesc_mismatched_quotes_kept() {
        assert_eq!(
            scan("pkgdesc=\"a tool'").fields.get("pkgdesc"),
            Some("\"a tool'")
        );
    }

    #[test]
    fn test_array_syntax_flattened() {
        let result = scan("depends=('bar' \"baz\")");
        assert_eq!(result.fields.get("depends"), Some("bar baz"));
    }

    #[test]
    fn test_arch_parens_removed() {
        assert_eq!(scan("arch=(any)").fields.get("arch"), Some("any"));
    }

    #[test]
    fn test_last_write_wins() {
        let result = scan("pkgver=1.0\npkgver=2.0");
        assert_eq!(result.fields.get("pkgver"), Some("2.0"));
        assert_eq!(result.fields.len(), 1);
    }

    #[test]
    fn test_double_equals_not_an_assignment() {
        let result = scan("pkgver==1.0");
        assert!(!result.fields.contains_key("pkgver"));
    }

    #[test]
    fn test_empty_value_ignored() {
        let result = scan("pkgver=");
        assert!(!result.fields.contains_key("pkgver"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let result = scan("options=opt=val");
        assert_eq!(result.fields.get("options"), Some("opt=val"));
    }

    #[test]
    fn test_parameter_default_neutralized() {
        let result = scan("source=${pkgver#default}");
        assert_eq!(result.fields.get("source"), Some("pkgverdefault"));
    }

    #[test]
    fn test_eval_key_kept_with_marker() {
        let result = scan("eval pkgname={$depends}-suffix");
        assert_eq!(
            result.fields.get("eval pkgname"),
            Some("{$depends}-suffix")
        );
    }

    #[test]
    fn test_build_function_detected() {
        let result = scan("build() {\nmake\n}");
        assert!(result.saw_build_function);
    }

    #[test]
    fn test_build_function_one_liner() {
        assert!(scan("build() { :; }").saw_build_function);
    }

    #[test]
    fn test_no_build_function() {
        assert!(!scan("pkgname=foo").saw_build_function);
    }

    #[test]
    fn test_ignored_lines_collected_on_request() {
        let lines = normalize_lines("pkgname=foo\nmake install\n\nbuild() { :; }");
        let result = scan_assignments(&lines, true);
        assert_eq!(result.ignored_lines, vec!["make install"]);
    }

    #[test]
    fn test_ignored_lines_not_collected_by_default() {
        let result = scan("make install");
        assert!(result.ignored_lines.is_empty());
    }
}
