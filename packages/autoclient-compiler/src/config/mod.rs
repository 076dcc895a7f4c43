//! Transform Configuration
//!
//! Two ways to configure a pass:
//! - Defaults: `TransformConfig::default()` (marker module `auto-client-api`)
//! - YAML: `TransformConfig::from_yaml("autoclient.yaml")`
//!
//! # Examples
//!
//! ```rust,ignore
//! use autoclient_compiler::config::TransformConfig;
//!
//! let config = TransformConfig::default()
//!     .marker_modules(vec!["@acme/api".to_string()])
//!     .max_depth(128);
//! config.validate()?;
//! ```

pub mod error;
pub mod io;
pub mod transform_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use transform_config::TransformConfig;
