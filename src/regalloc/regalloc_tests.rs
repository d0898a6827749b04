use super::*;
use crate::ir::dump;
use crate::{ir, lexer, parser};
use expect_test::{expect, Expect};

fn var(name: &str) -> Value {
    Value::Variable(name.to_owned())
}

fn lit(text: &str) -> Value {
    Value::Literal(text.to_owned())
}

fn add(dest: &str, a: &str, b: &str) -> Operation {
    Operation::new(OpKind::Add, var(dest), var(a), var(b))
}

fn check_source(source: &str, expect: Expect) {
    let tokens = lexer::tokenize(source).unwrap();
    let tree = parser::parse(&tokens).unwrap();
    let ir = ir::generate_ir(&tree).unwrap();
    expect.assert_eq(&dump(&allocate(&ir)));
}

#[test]
fn test_register_map_is_a_bijection() {
    let mut map = RegisterMap::new();
    assert_eq!(None, map.bind(Register::Ebx, "a"));
    assert_eq!(None, map.bind(Register::Ecx, "b"));

    assert_eq!(Some("b".to_owned()), map.bind(Register::Ecx, "a"));
    assert!(map.is_free(Register::Ebx));
    assert_eq!(None, map.register_of("b"));
    assert_eq!(Some(Register::Ecx), map.register_of("a"));
    assert_eq!(Some("a"), map.variable_in(Register::Ecx));
    assert_eq!(1, map.len());

    assert_eq!(Some("a".to_owned()), map.release(Register::Ecx));
    assert!(map.is_empty());
}

#[test]
fn test_literals_only() {
    check_source(
        "1+2;",
        expect![[r#"
            ADD eax 1 2
        "#]],
    );
}

#[test]
fn test_nested_fixture() {
    check_source(
        "(3*4+4*5)/(2*3-1*2);",
        expect![[r#"
            MUL eax 3 4
            SAVE {__temp__#3} eax
            MUL eax 4 5
            LOAD ebx {__temp__#3}
            ADD eax ebx eax
            SAVE {__temp__#1} eax
            MUL eax 2 3
            SAVE {__temp__#5} eax
            MUL eax 1 2
            LOAD ecx {__temp__#5}
            SUB eax ecx eax
            LOAD edx {__temp__#1}
            DIV eax edx eax
        "#]],
    );
}

#[test]
fn test_same_variable_twice() {
    check_source(
        "x = 3; y = x * x;",
        expect![[r#"
            LOAD eax 3
            MUL eax eax eax
        "#]],
    );
}

#[test]
fn test_spilling() {
    let ir = vec![
        Operation::load(var("a"), lit("1")),
        Operation::load(var("b"), lit("2")),
        Operation::load(var("c"), lit("3")),
        Operation::load(var("d"), lit("4")),
        add("e", "a", "b"),
        add("f", "c", "a"),
        add("g", "d", "e"),
        add("h", "b", "a"),
        add("i", "c", "f"),
    ];
    expect![[r#"
        LOAD eax 1
        SAVE {a} eax
        LOAD eax 2
        SAVE {b} eax
        LOAD eax 3
        SAVE {c} eax
        LOAD eax 4
        LOAD ebx {a}
        LOAD ecx {b}
        SAVE {d} eax
        ADD eax ebx ecx
        LOAD edx {c}
        SAVE {e} eax
        ADD eax edx ebx
        SAVE {f} eax
        LOAD eax {d}
        SAVE {c} edx
        LOAD edx {e}
        ADD eax eax edx
        ADD eax ecx ebx
        LOAD ebx {c}
        LOAD ecx {f}
        ADD eax ebx ecx
    "#]]
    .assert_eq(&dump(&allocate(&ir)));
}

#[test]
fn test_every_operand_is_allocated() {
    let tokens = lexer::tokenize("a = 7; b = a - 2; c = (a + b) * (b - a) / 3; c - a * b;").unwrap();
    let tree = parser::parse(&tokens).unwrap();
    let allocated = allocate(&ir::generate_ir(&tree).unwrap());
    for op in &allocated {
        match op.op {
            OpKind::Save => assert!(op.destination.variable().is_some()),
            OpKind::Load => {
                assert!(op.destination.register().is_some());
            }
            _ => {
                assert_eq!(Value::Register(Register::Eax), op.destination);
                assert!(op.source1.variable().is_none(), "{op}");
                assert!(op.source2.variable().is_none(), "{op}");
            }
        }
    }
}

#[test]
fn test_nop_passes_through() {
    let ir = vec![Operation::new(OpKind::Nop, Value::None, Value::None, Value::None)];
    assert_eq!(ir, allocate(&ir));
}
