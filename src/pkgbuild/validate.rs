// src/pkgbuild/validate.rs

//! Required-field validation
//!
//! Runs after extraction and before any expansion. The build-function
//! check comes first, then the mandatory keys in a fixed order; the
//! first problem found is the only one reported, which keeps the error
//! messages identical to what submitters have always seen.

use crate::error::MetadataError;
use crate::pkgbuild::assign::ScanResult;

/// Mandatory keys, in reporting order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "url", "pkgdesc", "license", "pkgrel", "pkgver", "arch", "pkgname",
];

/// Check that the build marker was seen and every mandatory key is
/// present. Values are not validated beyond existence.
pub fn validate_required(scan: &ScanResult) -> Result<(), MetadataError> {
    if !scan.saw_build_function {
        return Err(MetadataError::MissingBuildFunction);
    }
    for field in REQUIRED_FIELDS {
        if !scan.fields.contains_key(field) {
            return Err(MetadataError::MissingRequiredField(field.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkgbuild::fields::FieldMap;

    fn scan_with(fields: &[&str], saw_build: bool) -> ScanResult {
        ScanResult {
            fields: fields.iter().map(|f| (*f, "x")).collect::<FieldMap>(),
            saw_build_function: saw_build,
            ignored_lines: Vec::new(),
        }
    }

    #[test]
    fn test_missing_build_function_reported_first() {
        let scan = scan_with(&[], false);
        assert_eq!(
            validate_required(&scan),
            Err(MetadataError::MissingBuildFunction)
        );
    }

    #[test]
    fn test_first_missing_field_in_fixed_order() {
        // everything except url and pkgver missing value order check:
        // url comes before pkgver in the scan order
        let scan = scan_with(&["pkgdesc", "license", "pkgrel", "arch", "pkgname"], true);
        assert_eq!(
            validate_required(&scan),
            Err(MetadataError::MissingRequiredField("url".to_string()))
        );
    }

    #[test]
    fn test_only_one_missing_field_reported() {
        let scan = scan_with(&["url", "pkgdesc", "license"], true);
        assert_eq!(
            validate_required(&scan),
            Err(MetadataError::MissingRequiredField("pkgrel".to_string()))
        );
    }

    #[test]
    fn test_all_present_passes() {
        let scan = scan_with(&REQUIRED_FIELDS, true);
        assert_eq!(validate_required(&scan), Ok(()));
    }
}
