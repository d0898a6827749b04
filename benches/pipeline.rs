//! Throughput of each compilation stage and of both back ends.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ulc::codegen::{codegen, emit_program};
use ulc::ir::generate_ir;
use ulc::lexer::{tokenize, Lexer};
use ulc::regalloc::allocate;
use ulc::{parser, Backend, CompileOptions, Compiler};

const SIMPLE: &str = "1 + 2 * 3;";

const NESTED: &str = "(3*4+4*5)/(2*3-1*2);";

const STATEMENTS: &str = r"
// running total
x = 1 + 2;
y = x * x - 4 / 2;
z = (x + y) * (y - x) / 3;
z - y + x;
";

const CASES: [(&str, &str); 3] = [
    ("simple", SIMPLE),
    ("nested", NESTED),
    ("statements", STATEMENTS),
];

fn wide_source() -> String {
    (1..=200)
        .map(|n| format!("({n} + {n}) * ({n} - 1) / {n};\n"))
        .collect()
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");
    let lexer = Lexer::default();
    for (name, source) in CASES {
        group.bench_with_input(BenchmarkId::new("tokenize", name), source, |b, source| {
            b.iter(|| lexer.tokenize(black_box(source)).unwrap());
        });
    }
    let wide = wide_source();
    group.bench_function("tokenize/wide", |b| {
        b.iter(|| lexer.tokenize(black_box(&wide)).unwrap());
    });
    group.finish();
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    for (name, source) in CASES {
        let tokens = tokenize(source).unwrap();
        group.bench_with_input(BenchmarkId::new("parse", name), &tokens, |b, tokens| {
            b.iter(|| parser::parse(black_box(tokens)).unwrap());
        });
    }
    group.finish();
}

fn bench_back_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("back_end");
    for (name, source) in CASES {
        let tree = parser::parse(&tokenize(source).unwrap()).unwrap();
        group.bench_with_input(BenchmarkId::new("ir", name), &tree, |b, tree| {
            b.iter(|| {
                let ir = generate_ir(black_box(tree)).unwrap();
                codegen(&allocate(&ir)).unwrap()
            });
        });
    }
    let tree = parser::parse(&tokenize(NESTED).unwrap()).unwrap();
    group.bench_function("tree_walk/nested", |b| {
        b.iter(|| emit_program(black_box(&tree)).unwrap());
    });
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let wide = wide_source();
    for backend in [Backend::Ir, Backend::TreeWalk] {
        group.bench_with_input(
            BenchmarkId::new("compile", backend),
            &wide,
            |b, source| {
                b.iter(|| {
                    let mut compiler = Compiler::new(CompileOptions {
                        backend,
                        ..CompileOptions::default()
                    });
                    compiler.compile(black_box(source)).unwrap().to_string()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_lexer,
    bench_parser,
    bench_back_ends,
    bench_full_pipeline
);
criterion_main!(benches);
