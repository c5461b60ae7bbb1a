use crate::config::{LayoutConfig, RenderConfig};
use crate::layout::{Layout, PlacedEvent};
use crate::text_metrics;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

use crate::ir::DAY_NAMES;

/// Inset between an event bar and its row edges.
const BAR_INSET: f32 = 3.0;
const TICK_LABEL_GAP: f32 = 16.0;

pub fn render_svg(
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
    render: &RenderConfig,
) -> String {
    let mut svg = String::new();
    let width = layout.width;
    let height = layout.height;
    let chart_left = config.margin_left;
    let chart_right = width - config.margin_right;
    let chart_top = config.margin_top;
    let chart_bottom = chart_top + layout.total_rows as f32 * config.row_height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        render.background
    ));

    // Alternating day bands behind everything else.
    for block in &layout.days {
        let y = chart_top + block.offset as f32 * config.row_height;
        let band_height = block.rows as f32 * config.row_height;
        let fill = if block.day % 2 == 0 {
            &theme.band_alt_color
        } else {
            &theme.band_color
        };
        svg.push_str(&format!(
            "<rect x=\"{chart_left:.2}\" y=\"{y:.2}\" width=\"{:.2}\" height=\"{band_height:.2}\" fill=\"{fill}\"/>",
            chart_right - chart_left,
        ));

        let label_y = y + band_height / 2.0 + theme.font_size / 3.0;
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{label_y:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            chart_left - 8.0,
            theme.font_family,
            theme.font_size,
            theme.text_color,
            DAY_NAMES[block.day]
        ));
    }

    // Dashed hour gridlines with tick labels along the bottom.
    for tick in config.tick_times() {
        let hours = tick.as_hours();
        if hours < layout.time_start || hours > layout.time_end {
            continue;
        }
        let x = time_x(layout, config, hours);
        svg.push_str(&format!(
            "<line x1=\"{x:.2}\" y1=\"{chart_top:.2}\" x2=\"{x:.2}\" y2=\"{chart_bottom:.2}\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"4 3\"/>",
            theme.grid_color
        ));
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{tick}</text>",
            chart_bottom + TICK_LABEL_GAP,
            theme.font_family,
            theme.font_size,
            theme.axis_color,
        ));
    }

    // Chart frame and title.
    svg.push_str(&format!(
        "<rect x=\"{chart_left:.2}\" y=\"{chart_top:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/>",
        chart_right - chart_left,
        chart_bottom - chart_top,
        theme.axis_color
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.1}\" fill=\"{}\">{}</text>",
        (chart_left + chart_right) / 2.0,
        chart_top - theme.font_size,
        theme.font_family,
        theme.font_size * 1.25,
        theme.text_color,
        escape_xml(&render.title)
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">Time (hours)</text>",
        (chart_left + chart_right) / 2.0,
        chart_bottom + TICK_LABEL_GAP * 2.0,
        theme.font_family,
        theme.font_size,
        theme.axis_color
    ));

    for placed in &layout.placed {
        svg.push_str(&event_bar_svg(placed, layout, theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn time_x(layout: &Layout, config: &LayoutConfig, hours: f32) -> f32 {
    config.margin_left + (hours - layout.time_start) * config.hour_width
}

fn event_bar_svg(
    placed: &PlacedEvent,
    layout: &Layout,
    theme: &Theme,
    config: &LayoutConfig,
) -> String {
    let x = time_x(layout, config, placed.event.start.as_hours());
    let bar_width = placed.event.duration_hours() * config.hour_width;
    let y = config.margin_top + placed.global_row as f32 * config.row_height + BAR_INSET;
    let bar_height = config.row_height - 2.0 * BAR_INSET;

    let mut out = format!(
        "<rect x=\"{x:.2}\" y=\"{y:.2}\" width=\"{bar_width:.2}\" height=\"{bar_height:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
        placed.hash_fill, theme.event_border_color
    );

    let lines = wrap_lines(&placed.label_lines(), bar_width, theme);
    let line_height = theme.font_size * 1.2;
    let max_lines = ((bar_height / line_height).floor() as usize).max(1);
    let lines = &lines[..lines.len().min(max_lines)];

    let center_x = x + bar_width / 2.0;
    let total_height = lines.len() as f32 * line_height;
    let start_y = y + bar_height / 2.0 - total_height / 2.0 + theme.font_size;
    out.push_str(&format!(
        "<text x=\"{center_x:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"black\">",
        theme.font_family, theme.font_size
    ));
    for (idx, line) in lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        out.push_str(&format!(
            "<tspan x=\"{center_x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    out.push_str("</text>");
    out
}

/// Re-wrap label lines so each fits the bar. Falls back to a width estimate
/// when no font face is available.
fn wrap_lines(lines: &[String], bar_width: f32, theme: &Theme) -> Vec<String> {
    let char_width = text_metrics::average_char_width(&theme.font_family, theme.font_size)
        .unwrap_or(theme.font_size * 0.56);
    let max_chars = ((bar_width - 8.0) / char_width).floor().max(4.0) as usize;

    let mut wrapped = Vec::new();
    for line in lines {
        if fits(line, bar_width, theme, max_chars) {
            wrapped.push(line.clone());
            continue;
        }
        let mut current = String::new();
        for word in line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if !current.is_empty() && !fits(&candidate, bar_width, theme, max_chars) {
                wrapped.push(current);
                current = word.to_string();
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            wrapped.push(current);
        }
    }
    wrapped
}

fn fits(line: &str, bar_width: f32, theme: &Theme, max_chars: usize) -> bool {
    match text_metrics::measure_text_width(line, theme.font_size, &theme.font_family) {
        Some(width) => width <= bar_width - 8.0,
        None => line.chars().count() <= max_chars,
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path) -> Result<()> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
