use crate::config::LayoutConfig;
use crate::ir::DAY_NAMES;
use crate::layout::{Layout, PlacedEvent};

/// Render the proportional fragment: one `ctm-day` container per weekday,
/// one `ctm-row` per packed row, events positioned by width/left percentages
/// of the shared time scale. Styling hooks are the `ctm-*` classes; page CSS
/// is the embedder's concern.
pub fn render_html(layout: &Layout, config: &LayoutConfig) -> String {
    let mut out = String::from("<div class=\"ctm-table\">");
    out.push_str(&hour_grid(layout));

    for block in &layout.days {
        let height = config.html_row_rem * block.rows as f32;
        out.push_str(&format!(
            "<div class=\"ctm-day\" id=\"day-{}\" style=\"height:{height}rem\">",
            block.day
        ));
        out.push_str(&format!(
            "<div class=\"ctm-day-label\">{}</div>",
            DAY_NAMES[block.day]
        ));
        out.push_str("<div class=\"ctm-day-rows\">");
        for row in 0..block.rows {
            out.push_str(&format!(
                "<div class=\"ctm-row\" id=\"row-{}-{row}\">",
                block.day
            ));
            for placed in layout
                .placed
                .iter()
                .filter(|p| p.event.day == block.day && p.local_row == row)
            {
                out.push_str(&event_div(placed, layout));
            }
            out.push_str("</div>");
            out.push_str(&grow_script("setRowSizes", &format!("row-{}-{row}", block.day)));
        }
        out.push_str("</div>");
        out.push_str(&grow_script("setDaySizes", &format!("day-{}", block.day)));
        out.push_str("</div>");
    }

    out.push_str("</div>");
    out
}

/// SVG underlay with one vertical line per whole hour inside the scale.
fn hour_grid(layout: &Layout) -> String {
    let mut out = String::from(
        "<div class=\"ctm-grid-wrapper-wrapper\"><div class=\"ctm-grid-wrapper\"><div class=\"ctm-grid\">",
    );
    out.push_str("<svg width=\"100%\" height=\"100%\">");
    let first = layout.time_start.ceil() as i32;
    let last = layout.time_end.ceil() as i32;
    for hour in first..last {
        let x = layout.fraction_of(hour as f32) * 100.0;
        out.push_str(&format!(
            "<line stroke=\"rgb(27,27,27)\" stroke-width=\"1\" y1=\"0%\" y2=\"100%\" x1=\"{x:.4}%\" x2=\"{x:.4}%\"></line>"
        ));
    }
    out.push_str("</svg></div></div></div>");
    out
}

fn event_div(placed: &PlacedEvent, layout: &Layout) -> String {
    let event = &placed.event;
    let width = event.duration_hours() / layout.time_span() * 100.0;
    let left = layout.fraction_of(event.start.as_hours()) * 100.0;
    let mut out = format!(
        "<div class=\"ctm-event {}\" style=\"width:{width:.4}%;left:{left:.4}%;background-color: {}; color: {}\">",
        event.kind.css_class(),
        placed.palette_fill,
        placed.palette_text.as_css()
    );
    out.push_str(&format!(
        "{} - {}<br>{}<br>{}<br>{} - {}",
        escape_html(event.kind.label_code()),
        escape_html(&event.name),
        escape_html(&event.teachers),
        escape_html(&event.room),
        event.start,
        event.end
    ));
    out.push_str("</div>");
    out
}

/// `load`/`resize` handler that grows a container to its tallest child, so
/// multi-line labels are never clipped.
fn grow_script(function: &str, element_id: &str) -> String {
    let mut out = String::from("<script>");
    out.push_str(&format!(
        "function {function}(el_id) {{ return () => {{ var max_height = 0; "
    ));
    out.push_str("var children = document.getElementById(el_id).children;");
    out.push_str(
        "for (var i = 0; i < children.length; i++) { \
         var child = children[i]; \
         max_height = child.offsetHeight < max_height ? max_height : child.offsetHeight; \
         }",
    );
    out.push_str("document.getElementById(el_id).style.height = max_height + \"px\";");
    out.push_str("}}");
    out.push_str(&format!(
        "window.addEventListener('resize', {function}('{element_id}'));"
    ));
    out.push_str(&format!(
        "window.addEventListener('load', {function}('{element_id}'))"
    ));
    out.push_str("</script>");
    out
}

pub fn write_output_html(html: &str, output: Option<&std::path::Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, html)?;
        }
        None => {
            print!("{}", html);
        }
    }
    Ok(())
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
