use serde::{Deserialize, Serialize};

pub type Ident = String;

/// Annotation tag for the `number` primitive.
pub const NUMBER_ANNOTATION: &str = "NumberTypeAnnotation";
/// Annotation tag for the `string` primitive.
pub const STRING_ANNOTATION: &str = "StringTypeAnnotation";
/// Annotation tag for the `boolean` primitive.
pub const BOOLEAN_ANNOTATION: &str = "BooleanTypeAnnotation";
/// Annotation tag for a reference to a declared interface.
pub const GENERIC_ANNOTATION: &str = "GenericTypeAnnotation";

/// Byte-offset span within a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Parsed program: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn new(body: Vec<Stmt>, span: Span) -> Self {
        Self { body, span }
    }

    /// All function declarations, in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FnDecl> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::Fn(decl) => Some(decl),
            _ => None,
        })
    }

    /// All interface declarations, in source order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDecl> {
        self.body.iter().filter_map(|stmt| match stmt {
            Stmt::Interface(decl) => Some(decl),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    Interface(InterfaceDecl),
    Fn(FnDecl),
    Expr(ExprStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Interface(decl) => decl.span,
            Stmt::Fn(decl) => decl.span,
            Stmt::Expr(stmt) => stmt.span,
        }
    }
}

/// Interface declaration: `interface Person { name: string; }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceDecl {
    pub name: Ident,
    pub fields: Vec<InterfaceField>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceField {
    pub name: Ident,
    pub ty: TypeRef,
    pub span: Span,
}

/// Function declaration: `function fn(a: number) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FnDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: Ident,
    /// `None` for an untyped parameter.
    pub ty: Option<TypeRef>,
    pub span: Span,
}

/// Function body. Only the raw text is kept; statements inside are not modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Block {
    pub raw: String,
    pub span: Span,
}

/// Declared type annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    /// Annotation identified by its tag, e.g. `NumberTypeAnnotation`.
    /// The tag is not guaranteed to be registered.
    Primitive(String),
    /// Reference to a declared interface by name.
    Generic(Ident),
}

impl TypeRef {
    pub fn number() -> Self {
        TypeRef::Primitive(NUMBER_ANNOTATION.to_string())
    }

    pub fn primitive(tag: impl Into<String>) -> Self {
        TypeRef::Primitive(tag.into())
    }

    pub fn generic(name: impl Into<Ident>) -> Self {
        TypeRef::Generic(name.into())
    }

    /// Registry key for this annotation.
    pub fn tag(&self) -> &str {
        match self {
            TypeRef::Primitive(tag) => tag,
            TypeRef::Generic(_) => GENERIC_ANNOTATION,
        }
    }
}

/// Expression statement: `fn("craig");`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    pub expr: CallExpr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Ident,
    pub args: Vec<Argument>,
    pub span: Span,
}

/// Literal argument at a call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Argument {
    Numeric(f64, Span),
    Str(String, Span),
    Object(Vec<ObjectProperty>, Span),
}

/// Classification of a literal argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Numeric,
    String,
    Object,
}

impl Argument {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Argument::Numeric(..) => LiteralKind::Numeric,
            Argument::Str(..) => LiteralKind::String,
            Argument::Object(..) => LiteralKind::Object,
        }
    }

    /// Value shown to the user in diagnostics. Object literals carry no scalar
    /// value and render as `undefined`.
    pub fn display_value(&self) -> String {
        match self {
            Argument::Numeric(value, _) => format_number(*value),
            Argument::Str(value, _) => value.clone(),
            Argument::Object(..) => "undefined".to_string(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Argument::Numeric(_, span) | Argument::Str(_, span) | Argument::Object(_, span) => {
                *span
            }
        }
    }
}

/// Render a number the way a JavaScript runtime prints it: exponent form
/// (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`, plain decimal inside.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp,
    }
}

/// `key: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectProperty {
    pub key: Ident,
    pub value: Argument,
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_display_drops_trailing_zero() {
        assert_eq!(Argument::Numeric(42.0, Span::default()).display_value(), "42");
        assert_eq!(Argument::Numeric(1.5, Span::default()).display_value(), "1.5");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(0.0000001), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(999999999999999900000.0), "999999999999999900000");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn object_literal_displays_as_undefined() {
        let arg = Argument::Object(vec![], Span::default());
        assert_eq!(arg.kind(), LiteralKind::Object);
        assert_eq!(arg.display_value(), "undefined");
    }

    #[test]
    fn generic_ref_uses_generic_tag() {
        assert_eq!(TypeRef::generic("Person").tag(), GENERIC_ANNOTATION);
        assert_eq!(TypeRef::number().tag(), NUMBER_ANNOTATION);
        assert_eq!(TypeRef::primitive("made_up_type").tag(), "made_up_type");
    }

    #[test]
    fn program_filters_declarations() {
        let program = Program::new(
            vec![
                Stmt::Interface(InterfaceDecl {
                    name: "Person".into(),
                    fields: vec![],
                    span: Span::default(),
                }),
                Stmt::Fn(FnDecl {
                    name: "fn".into(),
                    params: vec![],
                    body: Block::default(),
                    span: Span::default(),
                }),
            ],
            Span::default(),
        );
        assert_eq!(program.functions().count(), 1);
        assert_eq!(program.interfaces().next().map(|i| i.name.as_str()), Some("Person"));
    }
}
