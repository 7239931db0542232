pub mod ast;
pub mod check;
pub mod registry;

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tc_typeck::CheckerConfig;

pub use ast::print_ast;
pub use check::{check, CheckOptions};
pub use registry::{describe_registry, print_registry};

pub(crate) fn read_source(path: &Utf8Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}

/// Load the checker config, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Utf8Path>) -> Result<CheckerConfig> {
    match path {
        Some(path) => {
            CheckerConfig::load(path).with_context(|| format!("Failed to load config {path}"))
        }
        None => Ok(CheckerConfig::default()),
    }
}
