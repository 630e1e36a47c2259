use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hubflow::config::{LayoutConfig, TextFitConfig};
use hubflow::layout::{compute_layout, fit_text};
use hubflow::parser::{DiagramSource, parse_diagram};
use hubflow::render::render_svg;
use hubflow::scene::build_scene;
use hubflow::text_metrics::ApproxTextMeasure;
use hubflow::theme::Theme;
use std::hint::black_box;

fn source(satellites: usize) -> DiagramSource {
    let list = |prefix: &str| {
        (0..satellites)
            .map(|idx| format!("{prefix} {idx}"))
            .collect::<Vec<_>>()
            .join(", ")
    };
    DiagramSource {
        identifier: satellites.to_string(),
        display_name: "Consolidated Regional Distribution Holdings".to_string(),
        inflows: list("Supplier"),
        outflows: list("Channel"),
        associated: list("Partner"),
    }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = LayoutConfig::default();
    for satellites in [1usize, 8, 64] {
        let graph = parse_diagram(&source(satellites));
        group.bench_with_input(BenchmarkId::from_parameter(satellites), &graph, |b, data| {
            b.iter(|| {
                let layout = compute_layout(black_box(data), &config);
                black_box(layout.nodes().len());
            });
        });
    }
    group.finish();
}

fn bench_fit_text(c: &mut Criterion) {
    let config = TextFitConfig::default();
    c.bench_function("fit_text_long_label", |b| {
        b.iter(|| {
            let fitted = fit_text(
                black_box("International Consolidated Regional Distribution Holdings Group"),
                176.0,
                86.0,
                &ApproxTextMeasure,
                &config,
            );
            black_box(fitted.font_size);
        });
    });
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::modern();
    let layout_config = LayoutConfig::default();
    let fit = TextFitConfig::default();
    for satellites in [1usize, 8, 64] {
        let input = source(satellites);
        group.bench_with_input(BenchmarkId::from_parameter(satellites), &input, |b, data| {
            b.iter(|| {
                let graph = parse_diagram(black_box(data));
                let layout = compute_layout(&graph, &layout_config);
                let scene = build_scene(&layout, &theme, &layout_config, &fit, &ApproxTextMeasure);
                let svg = render_svg(&scene, &theme, None);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_layout, bench_fit_text, bench_end_to_end
);
criterion_main!(benches);
