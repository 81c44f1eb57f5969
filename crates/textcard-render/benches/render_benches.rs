use criterion::{criterion_group, criterion_main, Criterion};
use textcard_core::{Background, Color, FontSource, RenderRequest, ShapeSpec};
use textcard_render::{create_gradient, Compositor};

fn full_request() -> RenderRequest {
    RenderRequest::new("Benchmarks take apps to the next level!", 1200, 1200)
        .with_font(FontSource::Default, 100.0)
        .with_background(Background::Gradient {
            start: Color::rgb(0xFF, 0x57, 0x33),
            end: Color::rgb(0x33, 0xFF, 0x57),
        })
        .with_shape(ShapeSpec::circle(Color::RED))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("textcard_render");
    group.sample_size(20);

    let compositor = Compositor::new();
    let request = full_request();
    group.bench_function("full_request_1200x1200", |b| {
        b.iter(|| compositor.render(&request).unwrap())
    });

    group.bench_function("gradient_only_1200x1200", |b| {
        b.iter(|| create_gradient(1200, 1200, Color::RED, Color::BLUE).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
