use std::collections::HashSet;

use tc_ast::{
    Argument, Block, CallExpr, ExprStmt, FnDecl, InterfaceDecl, InterfaceField, ObjectProperty,
    Param, Program, Span, Stmt, TypeRef, BOOLEAN_ANNOTATION, NUMBER_ANNOTATION, STRING_ANNOTATION,
};
use tc_lex::{lex, Token, TokenKind};
use thiserror::Error;

/// Object literals nested deeper than this are rejected instead of recursing further.
pub const MAX_OBJECT_DEPTH: usize = 128;

pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    let tokens = lex(source);
    Parser::new(source, tokens).parse()
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected token: expected {expected}, found {}", .found.describe())]
    Unexpected {
        expected: &'static str,
        found: TokenKind,
        span: Span,
    },
    #[error("invalid literal: {message}")]
    Invalid { message: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Unexpected { span, .. } | ParseError::Invalid { span, .. } => *span,
        }
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    interfaces: HashSet<String>,
    object_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            interfaces: HashSet::new(),
            object_depth: 0,
        }
    }

    fn parse(mut self) -> Result<Program, ParseError> {
        // Interfaces may be referenced before they are declared, so collect
        // their names ahead of time.
        self.interfaces = top_level_interfaces(&self.tokens);

        let start_span = self.peek().span;
        let mut body = Vec::new();
        while !self.at(TokenKind::Eof) {
            match self.peek().kind {
                TokenKind::KwInterface => {
                    let decl = self.parse_interface()?;
                    body.push(Stmt::Interface(decl));
                }
                TokenKind::KwFunction => {
                    let decl = self.parse_fn_decl()?;
                    body.push(Stmt::Fn(decl));
                }
                TokenKind::Ident => {
                    let stmt = self.parse_expr_stmt()?;
                    body.push(Stmt::Expr(stmt));
                }
                TokenKind::Semi => {
                    self.advance();
                }
                found => {
                    return Err(ParseError::Unexpected {
                        expected: "statement",
                        found,
                        span: self.peek().span,
                    })
                }
            }
        }

        let span = Span::new(start_span.start, self.peek().span.end);
        Ok(Program::new(body, span))
    }

    fn parse_interface(&mut self) -> Result<InterfaceDecl, ParseError> {
        let start = self.expect(TokenKind::KwInterface, "interface keyword")?.span;
        let name = self.expect(TokenKind::Ident, "interface name")?;
        self.expect(TokenKind::LBrace, "opening { in interface body")?;
        let mut fields = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            let field = self.expect(TokenKind::Ident, "interface field name")?;
            self.expect(TokenKind::Colon, ": after field name")?;
            let ty = self.parse_type()?;
            fields.push(InterfaceField {
                name: field.lexeme,
                ty,
                span: Span::new(field.span.start, self.previous().span.end),
            });
            if self.at(TokenKind::Semi) || self.at(TokenKind::Comma) {
                self.advance();
            }
        }
        let end = self
            .expect(TokenKind::RBrace, "closing } in interface body")?
            .span;
        Ok(InterfaceDecl {
            name: name.lexeme,
            fields,
            span: Span::new(start.start, end.end),
        })
    }

    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        let ident = self.expect(TokenKind::Ident, "type name")?;
        let ty = match ident.lexeme.as_str() {
            "number" => TypeRef::primitive(NUMBER_ANNOTATION),
            "string" => TypeRef::primitive(STRING_ANNOTATION),
            "boolean" => TypeRef::primitive(BOOLEAN_ANNOTATION),
            name if self.interfaces.contains(name) => TypeRef::generic(name),
            // Left for the checker to reject as an unknown annotation.
            other => TypeRef::primitive(other),
        };
        Ok(ty)
    }

    fn parse_fn_decl(&mut self) -> Result<FnDecl, ParseError> {
        let start = self.expect(TokenKind::KwFunction, "function keyword")?.span;
        let name = self.expect(TokenKind::Ident, "function name")?;
        self.expect(TokenKind::LParen, "opening ( in parameter list")?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen, "closing ) in parameter list")?;
        let body = self.parse_block()?;
        Ok(FnDecl {
            name: name.lexeme,
            params,
            span: Span::new(start.start, body.span.end),
            body,
        })
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
            let name = self.expect(TokenKind::Ident, "parameter name")?;
            let ty = if self.at(TokenKind::Colon) {
                self.advance();
                Some(self.parse_type()?)
            } else {
                None
            };
            params.push(Param {
                name: name.lexeme,
                ty,
                span: Span::new(name.span.start, self.previous().span.end),
            });
            if self.at(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(params)
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect(TokenKind::LBrace, "opening { in function body")?;
        let mut depth = 1;
        let mut end_span = open.span;
        while depth > 0 {
            let token = self.advance();
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth -= 1;
                    end_span = token.span;
                }
                TokenKind::Eof => {
                    return Err(ParseError::Invalid {
                        message: "unterminated function body".into(),
                        span: open.span,
                    })
                }
                _ => end_span = token.span,
            }
        }
        let raw = self.source[open.span.start as usize..end_span.end as usize].to_string();
        Ok(Block {
            raw,
            span: Span::new(open.span.start, end_span.end),
        })
    }

    fn parse_expr_stmt(&mut self) -> Result<ExprStmt, ParseError> {
        let callee = self.expect(TokenKind::Ident, "callee name")?;
        self.expect(TokenKind::LParen, "opening ( in call")?;
        let mut args = Vec::new();
        while !self.at(TokenKind::RParen) && !self.at(TokenKind::Eof) {
            args.push(self.parse_argument()?);
            if self.at(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        let close = self.expect(TokenKind::RParen, "closing ) in call")?.span;
        let call_span = Span::new(callee.span.start, close.end);
        if self.at(TokenKind::Semi) {
            self.advance();
        }
        Ok(ExprStmt {
            expr: CallExpr {
                callee: callee.lexeme,
                args,
                span: call_span,
            },
            span: Span::new(callee.span.start, self.previous().span.end),
        })
    }

    fn parse_argument(&mut self) -> Result<Argument, ParseError> {
        match self.peek().kind {
            TokenKind::Number => {
                let token = self.advance();
                let value = token.lexeme.parse::<f64>().map_err(|_| ParseError::Invalid {
                    message: format!("`{}` is not a number", token.lexeme),
                    span: token.span,
                })?;
                Ok(Argument::Numeric(value, token.span))
            }
            TokenKind::String => {
                let token = self.advance();
                Ok(Argument::Str(unquote(&token.lexeme), token.span))
            }
            TokenKind::LBrace => self.parse_object(),
            found => Err(ParseError::Unexpected {
                expected: "literal argument",
                found,
                span: self.peek().span,
            }),
        }
    }

    fn parse_object(&mut self) -> Result<Argument, ParseError> {
        if self.object_depth >= MAX_OBJECT_DEPTH {
            return Err(ParseError::Invalid {
                message: format!("object literal nested deeper than {MAX_OBJECT_DEPTH} levels"),
                span: self.peek().span,
            });
        }
        self.object_depth += 1;
        let object = self.parse_object_body();
        self.object_depth -= 1;
        object
    }

    fn parse_object_body(&mut self) -> Result<Argument, ParseError> {
        let open = self.expect(TokenKind::LBrace, "opening { in object literal")?.span;
        let mut properties = Vec::new();
        while !self.at(TokenKind::RBrace) && !self.at(TokenKind::Eof) {
            let key = match self.peek().kind {
                TokenKind::Ident => self.advance(),
                TokenKind::String => {
                    let mut token = self.advance();
                    token.lexeme = unquote(&token.lexeme);
                    token
                }
                found => {
                    return Err(ParseError::Unexpected {
                        expected: "property name",
                        found,
                        span: self.peek().span,
                    })
                }
            };
            self.expect(TokenKind::Colon, ": after property name")?;
            let value = self.parse_argument()?;
            properties.push(ObjectProperty {
                key: key.lexeme,
                span: Span::new(key.span.start, value.span().end),
                value,
            });
            if self.at(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        let close = self
            .expect(TokenKind::RBrace, "closing } in object literal")?
            .span;
        Ok(Argument::Object(properties, Span::new(open.start, close.end)))
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<Token, ParseError> {
        if self.peek().kind == kind {
            Ok(self.advance())
        } else {
            Err(ParseError::Unexpected {
                expected,
                found: self.peek().kind,
                span: self.peek().span,
            })
        }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos = usize::min(self.pos + 1, self.tokens.len() - 1);
        token
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }
}

/// Names of interfaces declared at the top level. Braced regions (function
/// bodies, interface bodies, object literals) are not scanned.
fn top_level_interfaces(tokens: &[Token]) -> HashSet<String> {
    let mut names = HashSet::new();
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => depth = depth.saturating_sub(1),
            TokenKind::KwInterface if depth == 0 => {
                if let Some(name) = tokens.get(index + 1).filter(|t| t.kind == TokenKind::Ident) {
                    names.insert(name.lexeme.clone());
                }
            }
            _ => {}
        }
    }
    names
}

/// Strip the surrounding quotes from a string lexeme and resolve escapes.
fn unquote(lexeme: &str) -> String {
    let inner = lexeme
        .get(1..lexeme.len().saturating_sub(1))
        .unwrap_or_default();
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitive_scenario() {
        let source = include_str!("../../../fixtures/programs/primitive_mismatch.tc");
        let program = parse_program(source).expect("program parses");
        assert_eq!(program.body.len(), 2);

        match &program.body[0] {
            Stmt::Expr(stmt) => {
                assert_eq!(stmt.expr.callee, "fn");
                assert_eq!(
                    stmt.expr.args,
                    vec![Argument::Str("craig-string".into(), stmt.expr.args[0].span())]
                );
            }
            other => panic!("expected call, got {other:?}"),
        }

        match &program.body[1] {
            Stmt::Fn(decl) => {
                assert_eq!(decl.name, "fn");
                assert_eq!(decl.params.len(), 1);
                assert_eq!(decl.params[0].ty, Some(TypeRef::number()));
                assert_eq!(decl.body.raw, "{}");
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn interface_reference_before_declaration_is_generic() {
        let program =
            parse_program("function fn(a: Person) {}\ninterface Person { name: string; }").unwrap();
        match &program.body[0] {
            Stmt::Fn(decl) => assert_eq!(decl.params[0].ty, Some(TypeRef::generic("Person"))),
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_name_keeps_its_spelling() {
        let program = parse_program("function fn(a: made_up_type) {}").unwrap();
        match &program.body[0] {
            Stmt::Fn(decl) => {
                assert_eq!(decl.params[0].ty, Some(TypeRef::primitive("made_up_type")))
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn untyped_parameter_has_no_annotation() {
        let program = parse_program("function log(message, level: number) { print(message); }")
            .unwrap();
        match &program.body[0] {
            Stmt::Fn(decl) => {
                assert_eq!(decl.params[0].ty, None);
                assert_eq!(decl.params[1].ty, Some(TypeRef::number()));
                assert_eq!(decl.body.raw, "{ print(message); }");
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn parses_nested_object_literal() {
        let program = parse_program(r#"greet({name: 'craig', "age": 30, extra: {}});"#).unwrap();
        let Stmt::Expr(stmt) = &program.body[0] else {
            panic!("expected call");
        };
        let Argument::Object(props, _) = &stmt.expr.args[0] else {
            panic!("expected object literal");
        };
        let keys: Vec<_> = props.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "age", "extra"]);
        assert_eq!(props[1].value, Argument::Numeric(30.0, props[1].value.span()));
        assert!(matches!(props[2].value, Argument::Object(ref inner, _) if inner.is_empty()));
    }

    #[test]
    fn interface_text_inside_function_body_is_not_declared() {
        let program =
            parse_program("function f() { interface Foo { a: number } }\nfunction g(a: Foo) {}")
                .unwrap();
        assert_eq!(program.interfaces().count(), 0);
        match &program.body[1] {
            Stmt::Fn(decl) => assert_eq!(decl.params[0].ty, Some(TypeRef::primitive("Foo"))),
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn rejects_deeply_nested_object_literal() {
        let depth = 200_000;
        let source = format!("f({}{});", "{a:".repeat(depth), "}".repeat(depth));
        let err = parse_program(&source).unwrap_err();
        match err {
            ParseError::Invalid { message, .. } => assert!(message.contains("nested deeper")),
            other => panic!("expected invalid-literal error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_nesting_up_to_the_limit() {
        let depth = MAX_OBJECT_DEPTH;
        let source = format!("f({}1{});", "{a:".repeat(depth), "}".repeat(depth));
        assert!(parse_program(&source).is_ok());
    }

    #[test]
    fn resolves_string_escapes() {
        assert_eq!(unquote(r#""a\"b\n""#), "a\"b\n");
        assert_eq!(unquote("'it\\'s'"), "it's");
    }

    #[test]
    fn reports_unterminated_body() {
        let err = parse_program("function fn(a: number) {").unwrap_err();
        assert!(matches!(err, ParseError::Invalid { .. }));
        assert_eq!(err.span(), Span::new(23, 24));
    }

    #[test]
    fn rejects_non_literal_argument() {
        let err = parse_program("fn(other);").unwrap_err();
        match err {
            ParseError::Unexpected { expected, found, .. } => {
                assert_eq!(expected, "literal argument");
                assert_eq!(found, TokenKind::Ident);
            }
            other => panic!("expected unexpected-token error, got {other:?}"),
        }
    }
}
