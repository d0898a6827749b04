mod common;

use ulc::error::ErrorKind;
use ulc::lexer::Tokens;
use ulc::{compiler, Backend, CompileError, CompileOptions, Compiler};

const FIXTURE: &str = "(3*4+4*5)/(2*3-1*2);";

fn with_backend(backend: Backend) -> Compiler {
    Compiler::new(CompileOptions {
        backend,
        ..CompileOptions::default()
    })
}

fn evaluate(backend: Backend, source: &str) -> i32 {
    let program = with_backend(backend).compile(source).unwrap();
    common::run(&program)
}

fn token_line(tokens: &Tokens) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_front_end() {
    let mut compiler = with_backend(Backend::Ir);
    let tokens = compiler.tokenize("1+2;").unwrap();
    assert_eq!("INTEGER(1) ADD INTEGER(2) SEMICOL", token_line(&tokens));

    let tree = compiler.parse(&tokens).unwrap();
    assert_eq!("Program(Add(1, 2))", tree.root().sexpr());
}

#[test]
fn test_fixture_on_both_backends() {
    assert_eq!(8, evaluate(Backend::Ir, FIXTURE));
    assert_eq!(8, evaluate(Backend::TreeWalk, FIXTURE));
}

#[test]
fn test_backends_agree() {
    let cases = [
        ("1+2;", 3),
        ("7-10;", -3),
        ("10-2*3;", 4),
        ("24/(2*3);", 4),
        ("(2+6)-4;", 4),
        ("(2+6)/4;", 2),
        ("100/7;", 14),
        ("2*3*4;", 24),
        ("1-2+3;", 2),
        ("8/4/2;", 1),
        ("1+2; 3*4;", 12),
        ("// header\n(1+1)*(2+2); // trailing", 8),
    ];
    for (source, expected) in cases {
        assert_eq!(expected, evaluate(Backend::Ir, source), "ir: {source}");
        assert_eq!(
            expected,
            evaluate(Backend::TreeWalk, source),
            "tree: {source}"
        );
    }
}

#[test]
fn test_assignments() {
    assert_eq!(6, evaluate(Backend::Ir, "x = 1 + 2; y = x * x; y - x;"));
    assert_eq!(2, evaluate(Backend::Ir, "a = b = 4 / 2; a;"));
    assert_eq!(9, evaluate(Backend::Ir, "x = 3; x * x;"));
}

#[test]
fn test_stack_is_balanced() {
    let program = with_backend(Backend::Ir).compile(FIXTURE).unwrap();
    let mut machine = common::Machine::new();
    assert_eq!(8, machine.run(&program));
    assert_eq!(0x1000, machine.esp());
}

#[test]
fn test_signatures_are_declarations() {
    let mut compiler = with_backend(Backend::TreeWalk);
    let program = compiler.compile("f : int -> int;\n2*3;").unwrap();
    assert_eq!(6, common::run(&program));
    assert_eq!(1, compiler.symbols().get("f").unwrap().arg_count);
}

#[test]
fn test_assembly_text() {
    let text = compiler::compile_to_string("1+2;").unwrap();
    assert!(text.starts_with("section .text\n"));
    assert!(text.contains("\tmov eax, 1\n\tadd eax, 2\n"));
    assert!(text.ends_with("\tint 0x80\n"));
}

#[test]
fn test_error_report() {
    let err = compiler::compile_to_string("1 + 2;\n(1+2;").unwrap_err();
    assert_eq!(
        "Error: Mismatched parenthesis in file `<input>` at line 2, column 1.",
        err.to_string()
    );
    assert_eq!(-1, err.error_code());
}

#[test]
fn test_error_kinds() {
    let kind = |source: &str| {
        with_backend(Backend::Ir)
            .compile(source)
            .unwrap_err()
            .kind()
            .cloned()
    };
    assert_eq!(Some(ErrorKind::MismatchedParenthesis), kind("1+2);"));
    assert_eq!(Some(ErrorKind::DanglingOperand), kind("1 2;"));
    assert_eq!(Some(ErrorKind::UnterminatedStatement), kind("1+2"));
    assert_eq!(Some(ErrorKind::UnknownSymbol("x".into())), kind("x + 1;"));
    assert!(matches!(kind("1+;"), Some(ErrorKind::MissingOperand(_))));
    assert!(matches!(kind("1 + 2 $"), Some(ErrorKind::LexError { .. })));
}

#[test]
fn test_tree_walk_rejects_variables() {
    let err = with_backend(Backend::TreeWalk).compile("x = 1;").unwrap_err();
    assert!(matches!(err, CompileError::Fault(_)));
    assert_eq!(-1, err.error_code());
}
