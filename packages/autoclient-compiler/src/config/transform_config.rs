//! Transform configuration
//!
//! Builder-style settings for one rewrite pass, loadable from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigFileV1;

/// Module specifier the entry points are imported from by default
pub const DEFAULT_MARKER_MODULE: &str = "auto-client-api";

const SUPPORTED_VERSIONS: &[u32] = &[1];
const MAX_DEPTH_LIMIT: u32 = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Import specifiers whose exports are the recognized entry points
    pub marker_modules: Vec<String>,

    /// Drop `import ... from "<marker>"` declarations from the output
    pub elide_marker_imports: bool,

    /// Attach the rendered union/intersection type as a label on `Or`/`And`
    pub label_unions: bool,

    /// Recursion budget for synthesis; exceeding it is a fatal error
    pub max_depth: u32,

    /// File extensions picked up when a directory is given as input
    pub extensions: Vec<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            marker_modules: vec![DEFAULT_MARKER_MODULE.to_string()],
            elide_marker_imports: true,
            label_unions: true,
            max_depth: 64,
            extensions: vec!["ts".to_string(), "tsx".to_string()],
        }
    }
}

impl TransformConfig {
    /// Builder: Set marker_modules
    pub fn marker_modules(mut self, v: Vec<String>) -> Self {
        self.marker_modules = v;
        self
    }

    /// Builder: Set elide_marker_imports
    pub fn elide_marker_imports(mut self, v: bool) -> Self {
        self.elide_marker_imports = v;
        self
    }

    /// Builder: Set label_unions
    pub fn label_unions(mut self, v: bool) -> Self {
        self.label_unions = v;
        self
    }

    /// Builder: Set max_depth
    pub fn max_depth(mut self, v: u32) -> Self {
        self.max_depth = v;
        self
    }

    /// Builder: Set extensions
    pub fn extensions(mut self, v: Vec<String>) -> Self {
        self.extensions = v;
        self
    }

    pub fn is_marker_module(&self, specifier: &str) -> bool {
        self.marker_modules.iter().any(|m| m == specifier)
    }

    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.trim_start_matches('.') == ext)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_depth",
                self.max_depth,
                1,
                MAX_DEPTH_LIMIT,
                "Synthesis depth must be at least 1 and bounded",
            ));
        }

        if self.marker_modules.iter().all(|m| m.trim().is_empty()) {
            return Err(ConfigError::EmptyMarkerModules);
        }

        if self.extensions.is_empty() {
            return Err(ConfigError::EmptyExtensions);
        }

        Ok(())
    }

    /// Load from a YAML file, merge onto defaults and validate
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let mut config = Self::default();
        if let Some(v) = file.marker_modules {
            config.marker_modules = v;
        }
        if let Some(v) = file.elide_marker_imports {
            config.elide_marker_imports = v;
        }
        if let Some(v) = file.label_unions {
            config.label_unions = v;
        }
        if let Some(v) = file.max_depth {
            config.max_depth = v;
        }
        if let Some(v) = file.extensions {
            config.extensions = v;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            marker_modules: Some(self.marker_modules.clone()),
            elide_marker_imports: Some(self.elide_marker_imports),
            label_unions: Some(self.label_unions),
            max_depth: Some(self.max_depth),
            extensions: Some(self.extensions.clone()),
        };
        serde_yaml::to_string(&file).map_err(ConfigError::Yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_valid() {
        let config = TransformConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_marker_module("auto-client-api"));
        assert!(config.accepts_extension("ts"));
        assert!(!config.accepts_extension("js"));
    }

    #[test]
    fn test_max_depth_range() {
        let err = TransformConfig::default().max_depth(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Range { ref field, .. } if field == "max_depth"));

        let err = TransformConfig::default().max_depth(5000).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Range { .. }));
    }

    #[test]
    fn test_empty_marker_modules_rejected() {
        let err = TransformConfig::default()
            .marker_modules(vec![])
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMarkerModules));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TransformConfig::default().max_depth(100).label_unions(false);
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("max_depth: 100"));

        let loaded = TransformConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_yaml_missing_version() {
        let err = TransformConfig::from_yaml_str("max_depth: 10\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingVersion));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let err = TransformConfig::from_yaml_str("version: 2\n").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 2, .. }));
    }

    #[test]
    fn test_yaml_loading() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "version: 1\nmarker_modules:\n  - \"@acme/client\"\nelide_marker_imports: false\n"
        )
        .unwrap();

        let config = TransformConfig::from_yaml(file.path()).unwrap();
        assert_eq!(config.marker_modules, vec!["@acme/client".to_string()]);
        assert!(!config.elide_marker_imports);
        assert_eq!(config.max_depth, 64);
    }
}
