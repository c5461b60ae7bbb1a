use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use weekgrid::config::Config;
use weekgrid::html::render_html;
use weekgrid::layout::compute_layout;
use weekgrid::parser::parse_events;
use weekgrid::render::render_svg;

/// Synthetic week: `per_day` events on each weekday, every `overlap`-th one
/// shifted so it collides with its predecessor and forces an extra row.
fn dense_week_source(per_day: usize, overlap: usize) -> String {
    let mut out = String::from("[");
    let mut first = true;
    for day in 0..5 {
        for slot in 0..per_day {
            let start_min = 7 * 60 + 30 + (slot * 45) % (10 * 60);
            let start_min = if overlap > 0 && slot % overlap == 0 && slot > 0 {
                start_min - 30
            } else {
                start_min
            };
            let end_min = start_min + 90;
            if !first {
                out.push(',');
            }
            first = false;
            out.push_str(&format!(
                r#"{{"name": "SUBJ-{}", "type": "{}", "day": {}, "starttime": "{:02}:{:02}", "endtime": "{:02}:{:02}", "room": "T9:{}", "teachers": "Teacher {}"}}"#,
                slot % 12,
                ["P", "C", "L"][slot % 3],
                day,
                start_min / 60,
                start_min % 60,
                end_min / 60,
                end_min % 60,
                100 + slot,
                slot % 7,
            ));
        }
    }
    out.push(']');
    out
}

const SIZES: [(&str, usize, usize); 3] = [
    ("week_sparse", 4, 0),
    ("week_medium", 8, 3),
    ("week_dense", 14, 2),
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, per_day, overlap) in SIZES {
        let input = dense_week_source(per_day, overlap);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let timetable = parse_events(black_box(data)).expect("parse failed");
                black_box(timetable.events.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let config = Config::default();
    for (name, per_day, overlap) in SIZES {
        let timetable = parse_events(&dense_week_source(per_day, overlap)).expect("parse failed");
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &timetable,
            |b, timetable| {
                b.iter(|| {
                    let layout = compute_layout(black_box(timetable), &config.layout);
                    black_box(layout.total_rows);
                });
            },
        );
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    let config = Config::default();
    for (name, per_day, overlap) in SIZES {
        let timetable = parse_events(&dense_week_source(per_day, overlap)).expect("parse failed");
        let layout = compute_layout(&timetable, &config.layout);
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &config.theme, &config.layout, &config.render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_render_html(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_html");
    let config = Config::default();
    for (name, per_day, overlap) in SIZES {
        let timetable = parse_events(&dense_week_source(per_day, overlap)).expect("parse failed");
        let layout = compute_layout(&timetable, &config.layout);
        group.bench_with_input(BenchmarkId::from_parameter(name), &layout, |b, data| {
            b.iter(|| {
                let html = render_html(black_box(data), &config.layout);
                black_box(html.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for (name, per_day, overlap) in SIZES {
        let input = dense_week_source(per_day, overlap);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, data| {
            b.iter(|| {
                let timetable = parse_events(black_box(data)).expect("parse failed");
                let layout = compute_layout(&timetable, &config.layout);
                let svg = render_svg(&layout, &config.theme, &config.layout, &config.render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_parse, bench_layout, bench_render, bench_render_html, bench_end_to_end
);
criterion_main!(benches);
