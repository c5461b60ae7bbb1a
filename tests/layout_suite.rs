use std::path::Path;

use weekgrid::{Config, compute_layout, parse_events, render_html, render_svg};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
}

fn assert_valid_html(html: &str, fixture: &str) {
    assert!(
        html.starts_with("<div class=\"ctm-table\">"),
        "{fixture}: missing ctm-table wrapper"
    );
    assert!(html.ends_with("</div>"), "{fixture}: unbalanced fragment");
}

fn load_fixture(rel: &str) -> weekgrid::Timetable {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures");
    let path = root.join(rel);
    assert!(path.exists(), "fixture missing: {}", rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_events(&input).expect("parse failed")
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "basic_week.json",
        "overlapping.json",
        "boundary_touching.json",
        "empty.json",
        "duplicate_names.json",
        "unknown_kind.json",
        "parity_weeks.json",
    ];

    let config = Config::default();
    for rel in candidates {
        let timetable = load_fixture(rel);
        let layout = compute_layout(&timetable, &config.layout);
        assert_eq!(layout.placed.len(), timetable.events.len(), "{rel}");

        let svg = render_svg(&layout, &config.theme, &config.layout, &config.render);
        assert_valid_svg(&svg, rel);
        let html = render_html(&layout, &config.layout);
        assert_valid_html(&html, rel);

        // Rendering is a pure function of the layout.
        let layout_again = compute_layout(&timetable, &config.layout);
        let svg_again = render_svg(&layout_again, &config.theme, &config.layout, &config.render);
        assert_eq!(svg, svg_again, "{rel}: chart output is not stable");
        assert_eq!(
            html,
            render_html(&layout_again, &config.layout),
            "{rel}: fragment output is not stable"
        );
    }
}

#[test]
fn overlapping_events_stack_into_rows() {
    let config = Config::default();
    let timetable = load_fixture("overlapping.json");
    let layout = compute_layout(&timetable, &config.layout);

    // Monday holds three mutually overlapping events, so three rows.
    assert_eq!(layout.days[0].rows, 3);
    // The two simultaneous Wednesday events cannot share a row.
    assert_eq!(layout.days[2].rows, 2);
    // Empty days still reserve one row each.
    assert_eq!(layout.days[1].rows, 1);
    assert_eq!(layout.total_rows, 3 + 1 + 2 + 1 + 1);

    let monday_rows: Vec<usize> = layout
        .placed
        .iter()
        .filter(|p| p.event.day == 0)
        .map(|p| p.local_row)
        .collect();
    assert_eq!(monday_rows, vec![0, 1, 2]);
}

#[test]
fn touching_events_share_a_row() {
    let config = Config::default();
    let timetable = load_fixture("boundary_touching.json");
    let layout = compute_layout(&timetable, &config.layout);

    // Back-to-back events reuse the freed row, so the day stays single-row.
    assert_eq!(layout.days[1].rows, 1);
    assert!(layout.placed.iter().all(|p| p.local_row == 0));
}

#[test]
fn empty_timetable_uses_the_axis_span() {
    let config = Config::default();
    let timetable = load_fixture("empty.json");
    let layout = compute_layout(&timetable, &config.layout);

    assert!(layout.placed.is_empty());
    assert_eq!(layout.total_rows, 5);
    assert_eq!(layout.time_start, 7.5);
    assert_eq!(layout.time_end, 18.0);
}

#[test]
fn duplicate_names_share_colors() {
    let config = Config::default();
    let timetable = load_fixture("duplicate_names.json");
    let layout = compute_layout(&timetable, &config.layout);

    let first = &layout.placed[0];
    for placed in &layout.placed {
        assert_eq!(placed.hash_fill, first.hash_fill);
        assert_eq!(placed.palette_fill, first.palette_fill);
    }
}

#[test]
fn unknown_kinds_render_with_their_token() {
    let config = Config::default();
    let timetable = load_fixture("unknown_kind.json");
    let layout = compute_layout(&timetable, &config.layout);

    let html = render_html(&layout, &config.layout);
    assert!(html.contains("ctm-event-other"));
    assert!(html.contains("K - Consultation"));

    let svg = render_svg(&layout, &config.theme, &config.layout, &config.render);
    assert!(svg.contains("Consultation - K"));
}
