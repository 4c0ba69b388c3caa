use criterion::{black_box, criterion_group, criterion_main, Criterion};

use airfoil_algebra::airfoil::generate::generate_naca4;

fn benchmark(c: &mut Criterion) {
    c.bench_function("Generate NACA 2412", |b| {
        b.iter(|| generate_naca4(black_box(2.0), black_box(4.0), black_box(12.0), 299))
    });

    let a = generate_naca4(2.0, 4.0, 12.0, 299).unwrap();
    let other = generate_naca4(0.0, 0.0, 9.0, 501).unwrap();
    c.bench_function("Add airfoils", |b| b.iter(|| black_box(&a).add(black_box(&other))));
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
