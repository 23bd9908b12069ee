// src/lib.rs

//! pkgmeta
//!
//! Metadata extraction for user-submitted PKGBUILD recipes.
//!
//! A recipe is a restricted shell-script-like text format; only its
//! variable-assignment surface is interpreted here, never its
//! executable shell semantics. The crate joins continuation lines,
//! collects `key=value` assignments, validates the mandatory fields,
//! resolves indirect `eval ` templates and `$name` references, and
//! hands back a flat ordered field map. The whole pipeline is a pure
//! function over the text: no I/O, no shared state, safe to run
//! concurrently for independent recipes.
//!
//! # Example
//!
//! ```
//! let recipe = r#"
//! pkgname=hello
//! pkgver=1.0
//! pkgrel=1
//! pkgdesc="Hello World"
//! url=http://example.com
//! license=GPL
//! arch=(any)
//! build() { :; }
//! "#;
//!
//! let result = pkgmeta::extract_metadata(recipe);
//! assert!(result.ok());
//! assert_eq!(result.fields.get("pkgname"), Some("hello"));
//! ```

mod error;
pub mod metadata;
pub mod pkgbuild;

pub use error::MetadataError;
pub use metadata::PackageMetadata;
pub use pkgbuild::fields::FieldMap;
pub use pkgbuild::{ExtractOptions, Extraction, extract_metadata, extract_metadata_with};
