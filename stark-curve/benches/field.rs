//! Field and curve arithmetic benchmarks

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use stark_curve::{AffinePoint, FieldElement, Scalar, ec_mult, mimic_ec_mult_air};
use std::hint::black_box;

const X: FieldElement =
    FieldElement::from_hex("01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca");
const Y: FieldElement =
    FieldElement::from_hex("005668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f");

fn bench_field_ops<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.bench_function("add", |b| b.iter(|| black_box(X) + black_box(Y)));
    group.bench_function("mul", |b| b.iter(|| black_box(X) * black_box(Y)));
    group.bench_function("square", |b| b.iter(|| black_box(X).square()));
    group.bench_function("cube", |b| b.iter(|| black_box(X).cube()));
    group.bench_function("invert", |b| b.iter(|| black_box(X).invert()));

    let square = X.square();
    group.bench_function("sqrt", |b| b.iter(|| black_box(square).sqrt()));
}

fn bench_point_ops<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let point = AffinePoint::GENERATOR;
    let scalar = Scalar::from_field_element(&X);

    group.bench_function("double", |b| b.iter(|| black_box(point).double()));
    group.bench_function("ec_mult", |b| {
        b.iter(|| ec_mult(black_box(&scalar), black_box(&point)))
    });
    group.bench_function("mimic_ec_mult_air", |b| {
        b.iter(|| mimic_ec_mult_air(black_box(&X), &point, &AffinePoint::SHIFT_POINT))
    });
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("field element operations");
    bench_field_ops(&mut group);
    group.finish();

    let mut group = c.benchmark_group("point operations");
    bench_point_ops(&mut group);
    group.finish();
}

criterion_group!(benches, bench_arithmetic);
criterion_main!(benches);
