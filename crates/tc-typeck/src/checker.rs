use crate::diagnostic::Diagnostic;
use crate::interface::{check_properties, resolve_interface, InterfaceResolution};
use crate::registry::{RegisteredType, TypeRegistry};
use tc_ast::{Argument, CallExpr, FnDecl, Program, Stmt, TypeRef};
use tracing::{debug, trace};

/// Checks call sites and parameter annotations of a program.
///
/// The checker holds no per-run state: every call to [`TypeChecker::check_program`]
/// starts from an empty diagnostic list.
pub struct TypeChecker<'r> {
    registry: &'r TypeRegistry,
    interface_resolution: InterfaceResolution,
}

impl<'r> TypeChecker<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            interface_resolution: InterfaceResolution::default(),
        }
    }

    pub fn with_interface_resolution(mut self, resolution: InterfaceResolution) -> Self {
        self.interface_resolution = resolution;
        self
    }

    /// Type check a complete program.
    ///
    /// Diagnostics come back in statement order; within a call in argument
    /// order, and within an interface check in field order.
    pub fn check_program(&self, program: &Program) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for stmt in &program.body {
            match stmt {
                Stmt::Fn(decl) => self.check_annotations(decl, &mut diagnostics),
                Stmt::Expr(stmt) => self.check_call(program, &stmt.expr, &mut diagnostics),
                Stmt::Interface(decl) => {
                    trace!(interface = %decl.name, "skipping interface declaration");
                }
            }
        }
        debug!(
            statements = program.body.len(),
            diagnostics = diagnostics.len(),
            "type check finished"
        );
        diagnostics
    }

    /// Every annotated parameter must name a registered type.
    fn check_annotations(&self, decl: &FnDecl, diagnostics: &mut Vec<Diagnostic>) {
        for param in &decl.params {
            let Some(ty) = &param.ty else {
                continue;
            };
            if !self.registry.is_known(ty.tag()) {
                debug!(function = %decl.name, param = %param.name, tag = ty.tag(), "unknown type");
                diagnostics.push(Diagnostic::UnknownType {
                    tag: ty.tag().to_string(),
                    param: param.name.clone(),
                    span: param.span,
                });
            }
        }
    }

    fn check_call(&self, program: &Program, call: &CallExpr, diagnostics: &mut Vec<Diagnostic>) {
        let Some(decl) = find_function(program, &call.callee) else {
            debug!(callee = %call.callee, "call to undeclared function");
            diagnostics.push(Diagnostic::UnknownFunction {
                name: call.callee.clone(),
                span: call.span,
            });
            return;
        };

        // Arguments pair with parameters by position; arity is not checked.
        for (index, arg) in call.args.iter().enumerate() {
            let declared = decl.params.get(index).and_then(|param| param.ty.as_ref());
            if !self.accepts(program, declared, arg, diagnostics) {
                let expected = declared
                    .and_then(|ty| self.registry.display_name(ty.tag()))
                    .map(str::to_string);
                diagnostics.push(Diagnostic::TypeMismatch {
                    value: arg.display_value(),
                    expected,
                    span: arg.span(),
                });
            }
        }
    }

    /// Whether `arg` satisfies the declared type.
    ///
    /// Structural annotations always report success; any interface mismatch is
    /// pushed as property diagnostics instead.
    fn accepts(
        &self,
        program: &Program,
        declared: Option<&TypeRef>,
        arg: &Argument,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        let Some(ty) = declared else {
            return false;
        };
        match self.registry.get(ty.tag()) {
            Some(RegisteredType::Primitive { accepts, .. }) => arg.kind() == *accepts,
            Some(RegisteredType::Structural) => {
                if let Argument::Object(properties, _) = arg {
                    match resolve_interface(program, ty, self.interface_resolution) {
                        Some(interface) => {
                            diagnostics.extend(check_properties(interface, properties));
                        }
                        None => trace!(tag = ty.tag(), "no interface to check against"),
                    }
                }
                true
            }
            None => false,
        }
    }
}

/// First function declaration named `name`, scanning from the top of the program.
pub fn find_function<'p>(program: &'p Program, name: &str) -> Option<&'p FnDecl> {
    program.functions().find(|decl| decl.name == name)
}
