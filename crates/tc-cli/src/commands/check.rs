//! `tinycheck check`: parse a program, type check it, report diagnostics.

use anyhow::Result;
use camino::Utf8PathBuf;
use tc_ast::Program;
use tc_typeck::{InterfaceResolution, TypeChecker, TypeRegistry};
use tracing::{debug, info};

use crate::diagnostics::{print_diagnostics, Diagnostic, DiagnosticConfig, KnownNames};

pub struct CheckOptions {
    pub path: Utf8PathBuf,
    pub config: Option<Utf8PathBuf>,
    /// Overrides the config file's interface resolution when set.
    pub interfaces: Option<InterfaceResolution>,
    pub json: bool,
}

/// Run the checker and print its report. Returns the number of diagnostics.
pub fn check(opts: &CheckOptions) -> Result<usize> {
    info!(action = "check", path = %opts.path, json = opts.json, "checking program");

    let source = super::read_source(&opts.path)?;
    let config = super::load_config(opts.config.as_deref())?;
    let resolution = opts.interfaces.unwrap_or(config.interface_resolution);
    let registry = config.registry();
    let source_file = opts.path.to_string();
    let output = DiagnosticConfig {
        json_output: opts.json,
        ..DiagnosticConfig::default()
    };

    let program = match tc_parse::parse_program(&source) {
        Ok(program) => program,
        Err(err) => {
            debug!(error = %err, "parse failed");
            let diag = Diagnostic::from_parse_error(&err, source_file);
            print_diagnostics(&[diag], &source, &output);
            return Ok(1);
        }
    };

    let found = TypeChecker::new(&registry)
        .with_interface_resolution(resolution)
        .check_program(&program);
    let known = known_names(&program, &registry);
    let diagnostics: Vec<Diagnostic> = found
        .iter()
        .map(|diag| Diagnostic::from_type_diagnostic(diag, source_file.clone(), &known))
        .collect();

    print_diagnostics(&diagnostics, &source, &output);
    if diagnostics.is_empty() && !opts.json {
        println!("✓ {source_file}: no type errors");
    }
    Ok(diagnostics.len())
}

fn known_names(program: &Program, registry: &TypeRegistry) -> KnownNames {
    let functions = program.functions().map(|decl| decl.name.clone()).collect();
    let types = registry
        .iter()
        .filter_map(|(tag, _)| registry.display_name(tag))
        .map(str::to_string)
        .chain(program.interfaces().map(|decl| decl.name.clone()))
        .collect();
    KnownNames { functions, types }
}
