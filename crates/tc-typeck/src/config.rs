//! Checker configuration loaded from TOML.
//!
//! ```toml
//! interface_resolution = "by-name"
//!
//! [[primitives]]
//! tag = "StringTypeAnnotation"
//! display = "string"
//! accepts = "string"
//! ```
//!
//! An empty file yields the default registry and first-declared interface
//! resolution.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tc_ast::LiteralKind;
use thiserror::Error;

use crate::interface::InterfaceResolution;
use crate::registry::TypeRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerConfig {
    pub interface_resolution: InterfaceResolution,
    /// Primitive annotations registered on top of the defaults.
    pub primitives: Vec<PrimitiveConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrimitiveConfig {
    pub tag: String,
    pub display: String,
    pub accepts: LiteralKind,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CheckerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Default registry extended with the configured primitives.
    pub fn registry(&self) -> TypeRegistry {
        self.primitives
            .iter()
            .fold(TypeRegistry::default(), |registry, primitive| {
                registry.with_primitive(&primitive.tag, &primitive.display, primitive.accepts)
            })
    }
}
