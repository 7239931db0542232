mod checker;
pub mod config;
mod diagnostic;
mod interface;
mod registry;

pub use checker::{find_function, TypeChecker};
pub use config::{CheckerConfig, ConfigError, PrimitiveConfig};
pub use diagnostic::{render, Diagnostic, UNDEFINED};
pub use interface::{check_properties, resolve_interface, InterfaceResolution};
pub use registry::{RegisteredType, TypeRegistry};

use tc_ast::Program;

/// Type check a program against the default registry.
pub fn check_program(program: &Program) -> Vec<Diagnostic> {
    let registry = TypeRegistry::default();
    TypeChecker::new(&registry).check_program(program)
}

/// Type check a program and render the diagnostics to message strings.
pub fn check(program: &Program) -> Vec<String> {
    render(&check_program(program))
}
