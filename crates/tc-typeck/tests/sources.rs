//! End-to-end checks: source text through the parser into the checker.

use tc_parse::parse_program;
use tc_typeck::{check, CheckerConfig, TypeChecker};

fn check_source(source: &str) -> Vec<String> {
    let program = parse_program(source).expect("source parses");
    check(&program)
}

#[test]
fn test_primitive_mismatch_fixture() {
    let source = include_str!("../../../fixtures/programs/primitive_mismatch.tc");
    assert_eq!(
        check_source(source),
        vec![r#"Type "craig-string" is incompatible with "number""#]
    );
}

#[test]
fn test_unknown_type_fixture() {
    let source = include_str!("../../../fixtures/programs/unknown_type.tc");
    assert_eq!(
        check_source(source),
        vec![
            r#"Type "craig-string" is incompatible with "undefined""#,
            r#"Type "made_up_type" for argument "a" does not exist"#,
        ]
    );
}

#[test]
fn test_interface_mismatch_fixture() {
    let source = include_str!("../../../fixtures/programs/interface_mismatch.tc");
    assert_eq!(
        check_source(source),
        vec![r#"Property "nam" does not exist on interface "Person". Did you mean Property "name"?"#]
    );
}

#[test]
fn test_missing_function_fixture() {
    let source = include_str!("../../../fixtures/programs/missing_function.tc");
    assert_eq!(
        check_source(source),
        vec![r#"Function "missing" does not exist"#]
    );
}

#[test]
fn test_well_typed_fixture() {
    let source = include_str!("../../../fixtures/programs/well_typed.tc");
    assert!(check_source(source).is_empty());
}

#[test]
fn test_numeric_literal_value_is_shown() {
    let diags = check_source("function greet(name: made_up) {}\ngreet(7.25);");
    assert_eq!(
        diags,
        vec![
            r#"Type "made_up" for argument "name" does not exist"#,
            r#"Type "7.25" is incompatible with "undefined""#,
        ]
    );
}

#[test]
fn test_configured_string_primitive() {
    let config = CheckerConfig::from_toml_str(
        r#"
[[primitives]]
tag = "StringTypeAnnotation"
display = "string"
accepts = "string"
"#,
    )
    .unwrap();
    let registry = config.registry();
    let program = parse_program("function greet(name: string) {}\ngreet('craig');\ngreet(1);")
        .unwrap();
    let diags = TypeChecker::new(&registry)
        .with_interface_resolution(config.interface_resolution)
        .check_program(&program);
    assert_eq!(
        tc_typeck::render(&diags),
        vec![r#"Type "1" is incompatible with "string""#]
    );
}

#[test]
fn test_string_annotation_unknown_by_default() {
    let diags = check_source("function greet(name: string) {}");
    assert_eq!(
        diags,
        vec![r#"Type "StringTypeAnnotation" for argument "name" does not exist"#]
    );
}

#[test]
fn test_interface_inside_function_body_does_not_declare_a_type() {
    let diags = check_source("function f() { interface Foo { a: number } }\nfunction g(a: Foo) {}");
    assert_eq!(
        diags,
        vec![r#"Type "Foo" for argument "a" does not exist"#]
    );
}

#[test]
fn test_large_number_rendered_in_exponent_form() {
    let diags = check_source("function g(a: made_up) {}\ng(1000000000000000000000);");
    assert_eq!(
        diags,
        vec![
            r#"Type "made_up" for argument "a" does not exist"#,
            r#"Type "1e+21" is incompatible with "undefined""#,
        ]
    );
}
