use serde::{Deserialize, Serialize};
use tc_ast::{InterfaceDecl, ObjectProperty, Program, TypeRef};

use crate::diagnostic::Diagnostic;

/// How an interface-typed parameter finds its interface declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterfaceResolution {
    /// The first interface declared in the program, whatever name the
    /// parameter references.
    #[default]
    #[serde(rename = "first")]
    FirstDeclared,
    /// The interface whose name matches the parameter's annotation.
    #[serde(rename = "by-name")]
    ByName,
}

/// Find the interface an annotation is checked against.
pub fn resolve_interface<'p>(
    program: &'p Program,
    ty: &TypeRef,
    resolution: InterfaceResolution,
) -> Option<&'p InterfaceDecl> {
    match resolution {
        InterfaceResolution::FirstDeclared => program.interfaces().next(),
        InterfaceResolution::ByName => match ty {
            TypeRef::Generic(name) => program.interfaces().find(|decl| &decl.name == name),
            TypeRef::Primitive(_) => None,
        },
    }
}

/// Compare object-literal properties against interface fields index by index.
///
/// Only positions present on both sides are compared, and only names: values
/// are not checked, and neither missing nor extra properties are reported.
pub fn check_properties(interface: &InterfaceDecl, properties: &[ObjectProperty]) -> Vec<Diagnostic> {
    interface
        .fields
        .iter()
        .zip(properties)
        .filter(|(field, property)| field.name != property.key)
        .map(|(field, property)| Diagnostic::PropertyMismatch {
            found: property.key.clone(),
            expected: field.name.clone(),
            interface: interface.name.clone(),
            span: property.span,
        })
        .collect()
}
