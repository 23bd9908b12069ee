// src/pkgbuild/lines.rs

//! Line normalization
//!
//! Collapses the recipe's physical lines into logical lines before any
//! assignment scanning happens. Two continuation forms are joined:
//!
//! - an explicit trailing backslash, which is stripped and the next
//!   line appended with no separator;
//! - an unbalanced open parenthesis (array literals spread over
//!   several lines), which appends the next line with a single space.
//!
//! Trailing `#` comments are stripped from every line. Parenthesis
//! depth is tallied on the trimmed line *before* the comment is
//! removed, so parentheses inside comment text still move the depth
//! counter. That matches how existing recipes in the wild have been
//! parsed for years; `paren_delta` is the single place to change if a
//! context-aware mode is ever wanted.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*#.*").unwrap());

/// One continuation-joined, comment-stripped line, tagged with the
/// logical sequence index it was emitted at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub index: usize,
    pub text: String,
}

/// Net parenthesis count of a line, quoting and comments ignored.
fn paren_delta(line: &str) -> i32 {
    let open = line.bytes().filter(|&b| b == b'(').count() as i32;
    let close = line.bytes().filter(|&b| b == b')').count() as i32;
    open - close
}

/// Join continuation lines and strip comments, preserving order.
///
/// Every physical line is consumed exactly once. A continuation left
/// unterminated at end of input is dropped, as the original upload
/// path did.
pub fn normalize_lines(content: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuation = false;
    let mut paren_depth: i32 = 0;

    for raw in content.split('\n') {
        let trimmed = raw.trim();
        paren_depth += paren_delta(trimmed);
        let line = COMMENT_RE.replace_all(trimmed, "");

        if let Some(stripped) = line.strip_suffix('\\') {
            // explicit continuation, no separator
            current.push_str(stripped);
            continuation = true;
        } else if paren_depth > 0 {
            // assumed continuation inside an open array literal
            current.push_str(&line);
            current.push(' ');
            continuation = true;
        } else {
            let text = if continuation {
                current.push_str(&line);
                std::mem::take(&mut current)
            } else {
                line.into_owned()
            };
            lines.push(LogicalLine {
                index: lines.len(),
                text,
            });
            continuation = false;
        }
    }

    debug!("normalized recipe into {} logical lines", lines.len());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(content: &str) -> Vec<String> {
        normalize_lines(content)
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn test_standalone_lines_pass_through() {
        let out = texts("pkgname=foo\npkgver=1.0");
        assert_eq!(out, vec!["pkgname=foo", "pkgver=1.0"]);
    }

    #[test]
    fn test_backslash_continuation_joins_without_separator() {
        let out = texts("depends=bar\\\nbaz");
        assert_eq!(out, vec!["depends=barbaz"]);
    }

    #[test]
    fn test_paren_continuation_joins_with_space() {
        let out = texts("depends=(bar\nbaz)");
        assert_eq!(out, vec!["depends=(bar baz)"]);
    }

    #[test]
    fn test_backslash_inside_open_parens() {
        // backslash branch takes precedence over paren depth
        let out = texts("depends=(bar \\\nbaz)");
        assert_eq!(out, vec!["depends=(bar baz)"]);
    }

    #[test]
    fn test_comment_stripped() {
        let out = texts("pkgver=1.0 # latest upstream");
        assert_eq!(out, vec!["pkgver=1.0"]);
    }

    #[test]
    fn test_paren_in_comment_still_counts() {
        // depth is tallied before the comment is removed, so the '('
        // in the comment keeps the continuation open
        let out = texts("pkgver=1.0 # (\nnext)");
        assert_eq!(out, vec!["pkgver=1.0 next)"]);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let out = texts("   pkgname=foo   ");
        assert_eq!(out, vec!["pkgname=foo"]);
    }

    #[test]
    fn test_unterminated_continuation_dropped() {
        let out = texts("pkgname=foo\ndepends=(bar");
        assert_eq!(out, vec!["pkgname=foo"]);
    }

    #[test]
    fn test_indices_are_sequential() {
        let lines = normalize_lines("a=1\nb=2\nc=3");
        let indices: Vec<usize> = lines.iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_prejoined_line_equals_backslash_join() {
        let joined = texts("source=http://example.com/\\\nfoo.tar.gz");
        let flat = texts("source=http://example.com/foo.tar.gz");
        assert_eq!(joined, flat);
    }
}
