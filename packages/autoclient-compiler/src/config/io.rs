//! Configuration I/O (YAML schema)
//!
//! Defines the on-disk YAML schema. Loading/merging lives in
//! `transform_config.rs`.

use serde::{Deserialize, Serialize};

/// YAML Schema v1
///
/// Every field except `version` is optional; absent fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_modules: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elide_marker_imports: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_unions: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ConfigFileV1, _> = serde_yaml::from_str("version: 1\nmax_dept: 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_partial_file_parses() {
        let file: ConfigFileV1 = serde_yaml::from_str("version: 1\nlabel_unions: false\n").unwrap();
        assert_eq!(file.version, Some(1));
        assert_eq!(file.label_unions, Some(false));
        assert!(file.marker_modules.is_none());
    }
}
