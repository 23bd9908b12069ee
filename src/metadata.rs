// src/metadata.rs

//! Typed view over an extracted field map
//!
//! The submission workflow reads individual fields out of the final map
//! and tokenizes the list-valued ones before anything is persisted.
//! `PackageMetadata` does that once, so callers get owned, typed data
//! instead of poking at map keys.

use crate::error::MetadataError;
use crate::pkgbuild::fields::FieldMap;
use serde::Serialize;

/// Canonical package metadata pulled from a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub release: String,
    pub description: String,
    pub license: String,
    pub url: String,
    pub arch: String,
    /// Dependency tokens, whitespace-split from the `depends` field.
    pub depends: Vec<String>,
    /// Source tokens, whitespace-split from the `source` field.
    pub sources: Vec<String>,
}

impl PackageMetadata {
    /// Build the typed record from a field map. Fails with the first
    /// missing mandatory field, same order the validator reports in.
    pub fn from_fields(fields: &FieldMap) -> Result<Self, MetadataError> {
        let required = |name: &str| -> Result<String, MetadataError> {
            fields
                .get(name)
                .map(str::to_string)
                .ok_or_else(|| MetadataError::MissingRequiredField(name.to_string()))
        };

        let tokens = |name: &str| -> Vec<String> {
            fields
                .get(name)
                .unwrap_or("")
                .split_whitespace()
                .map(str::to_string)
                .collect()
        };

        Ok(Self {
            url: required("url")?,
            description: required("pkgdesc")?,
            license: required("license")?,
            release: required("pkgrel")?,
            version: required("pkgver")?,
            arch: required("arch")?,
            name: required("pkgname")?,
            depends: tokens("depends"),
            sources: tokens("source"),
        })
    }

    /// Whether the `url` field carries a protocol scheme. Submissions
    /// with a bare host are rejected upstream with a "missing protocol"
    /// message; this is the check behind it.
    pub fn url_has_scheme(&self) -> bool {
        url::Url::parse(&self.url).is_ok()
    }
}
