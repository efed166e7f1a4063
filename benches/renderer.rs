use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use player_model_viz::config::{Config, LayoutConfig};
use player_model_viz::dataset::Dataset;
use player_model_viz::layout::compute_layout;
use player_model_viz::render::{Figure, render_scene, render_svg};
use player_model_viz::theme::Theme;
use std::hint::black_box;

fn dataset() -> Dataset {
    let csv = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/player_models.csv"
    ));
    Dataset::from_reader(csv.as_bytes()).expect("fixture should load")
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let data = dataset();
    let config = LayoutConfig::default();
    for record in data.records() {
        group.bench_with_input(BenchmarkId::from_parameter(&record.name), record, |b, record| {
            b.iter(|| {
                let layout = compute_layout(black_box(record), -120.0, &config).expect("valid record");
                black_box(layout.segments.len());
            });
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let data = dataset();
    let config = Config::default();
    let theme = Theme::plotly();
    let (left, right) = data.default_selection();
    let left_layout = compute_layout(left, -120.0, &config.layout).expect("valid record");
    let right_layout = compute_layout(right, 120.0, &config.layout).expect("valid record");
    c.bench_function("render/default_pair", |b| {
        b.iter(|| {
            let scene = render_scene(
                Figure {
                    record: left,
                    layout: &left_layout,
                    accent: &theme.accent_colors[0],
                },
                Figure {
                    record: right,
                    layout: &right_layout,
                    accent: &theme.accent_colors[1],
                },
                &theme,
                &config.render,
            );
            let svg = render_svg(black_box(&scene), &theme, &config.render);
            black_box(svg.len());
        });
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let csv = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/player_models.csv"
    ));
    let config = Config::default();
    c.bench_function("end_to_end/load_and_render", |b| {
        b.iter(|| {
            let data = Dataset::from_reader(black_box(csv).as_bytes()).expect("fixture should load");
            let left = data.lookup("Erling Haaland").expect("present");
            let right = data.lookup("Pedri").expect("present");
            let (_, svg) = player_model_viz::render_comparison(left, right, &config).expect("valid records");
            black_box(svg.len());
        });
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_render, bench_end_to_end
);
criterion_main!(benches);
