use catena_gql::{Field, Operation};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_operation(width: usize) -> Operation {
    let mut op = Operation::query("items").unwrap();
    for i in 0..width {
        op.add_field(format!("column_{}.value.text", i));
        op.add_field(format!("column_{}.id", i));
    }
    op.add_argument("limit", 100);
    op
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build 50 shorthand paths", |b| b.iter(|| build_operation(black_box(25))));
}

fn bench_render(c: &mut Criterion) {
    let op = build_operation(25);
    c.bench_function("render 25 wide operation", |b| b.iter(|| black_box(&op).format_body()));

    let deep = Field::new("root")
        .unwrap()
        .with_fields(["a.b.c.d.e.f.g.h.i.j.k.l.m.n.o.p"]);
    c.bench_function("render 16 deep field", |b| b.iter(|| black_box(&deep).format_body()));
}

criterion_group!(benches, bench_build, bench_render);
criterion_main!(benches);
