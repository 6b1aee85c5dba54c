use core_layout::{CodeType, LayoutProfile, Structure, ViewMode};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn wide_row() -> Structure {
    let profile = LayoutProfile::new(2, 4, 8).unwrap();
    Structure::compute(ViewMode::Dual, CodeType::Binary, profile, 256, 1 << 20).unwrap()
}

fn bench_pixel_position(c: &mut Criterion) {
    let structure = wide_row();
    let last = structure.characters_per_row();
    c.bench_function("pixel_position_row_end", |b| {
        b.iter(|| structure.compute_pixel_position(black_box(last), 9))
    });
    let width = structure.row_pixel_width(9);
    c.bench_function("column_at_pixel_row_end", |b| {
        b.iter(|| structure.compute_column_at_pixel(black_box(width - 1), 9))
    });
}

fn bench_fitting(c: &mut Criterion) {
    let profile = LayoutProfile::new(2, 4, 8).unwrap();
    c.bench_function("fitting_bytes_per_row_1920px", |b| {
        b.iter(|| {
            Structure::compute_fitting_bytes_per_row(
                ViewMode::Dual,
                CodeType::Hexadecimal,
                &profile,
                black_box(1920),
                8,
            )
        })
    });
}

criterion_group!(benches, bench_pixel_position, bench_fitting);
criterion_main!(benches);
