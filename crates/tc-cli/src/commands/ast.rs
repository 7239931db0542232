use anyhow::{Context, Result};
use camino::Utf8Path;
use tracing::info;

/// Print the parsed program as pretty JSON.
pub fn print_ast(path: &Utf8Path) -> Result<()> {
    info!(action = "ast", %path, "dumping syntax tree");
    let source = super::read_source(path)?;
    let program =
        tc_parse::parse_program(&source).with_context(|| format!("Failed to parse {path}"))?;
    println!("{}", serde_json::to_string_pretty(&program)?);
    Ok(())
}
