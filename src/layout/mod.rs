mod color;
mod compose;
mod rows;
pub(crate) mod types;
pub use types::*;

use std::collections::HashMap;

use log::debug;

use crate::config::LayoutConfig;
use crate::ir::{Timetable, WEEK_DAYS};

/// Run the full layout pass: group events by day, pack each day into rows,
/// stack the days, assign colors, and collect the placed events in day-major,
/// start-time order.
pub fn compute_layout(timetable: &Timetable, config: &LayoutConfig) -> Layout {
    let mut by_day: [Vec<usize>; WEEK_DAYS] = Default::default();
    for (index, event) in timetable.events.iter().enumerate() {
        by_day[event.day].push(index);
    }
    for day in &mut by_day {
        // Stable sort: input order breaks start-time ties.
        day.sort_by_key(|&index| timetable.events[index].start);
    }

    let mut row_counts = [0usize; WEEK_DAYS];
    let mut local_rows = vec![0usize; timetable.len()];
    for (day, indexes) in by_day.iter().enumerate() {
        let ordered: Vec<_> = indexes.iter().map(|&i| &timetable.events[i]).collect();
        let packed = rows::pack_rows(&ordered);
        row_counts[day] = packed.row_count;
        for (slot, &index) in indexes.iter().enumerate() {
            local_rows[index] = packed.rows[slot];
        }
    }
    let (days, total_rows) = compose::stack_days(&row_counts);

    let mut palette_index: HashMap<&str, usize> = HashMap::new();
    for name in timetable.distinct_names() {
        let next = palette_index.len();
        palette_index.insert(name, next);
    }

    let (time_start, time_end) = time_scale(timetable, config);

    let mut placed = Vec::with_capacity(timetable.len());
    for (day, indexes) in by_day.iter().enumerate() {
        for &index in indexes {
            let event = &timetable.events[index];
            let slot = palette_index.get(event.name.as_str()).copied().unwrap_or(0);
            let local_row = local_rows[index];
            placed.push(PlacedEvent {
                hash_fill: color::hash_color(&event.name),
                palette_fill: color::palette_color(slot),
                palette_text: color::best_text_color(color::palette_color(slot)),
                event: event.clone(),
                local_row,
                global_row: days[day].offset + local_row,
            });
        }
    }

    debug!(
        "layout: {} events in {} rows, scale {:.2}h..{:.2}h",
        placed.len(),
        total_rows,
        time_start,
        time_end
    );

    let width =
        config.margin_left + (time_end - time_start) * config.hour_width + config.margin_right;
    let height = config.margin_top + total_rows as f32 * config.row_height + config.margin_bottom;

    Layout {
        placed,
        days,
        total_rows,
        time_start,
        time_end,
        width,
        height,
    }
}

/// Shared horizontal scale in fractional hours. With no events the scale
/// falls back to the span of the configured axis ticks.
fn time_scale(timetable: &Timetable, config: &LayoutConfig) -> (f32, f32) {
    let earliest = timetable.events.iter().map(|e| e.start).min();
    let latest = timetable.events.iter().map(|e| e.end).max();
    if let (Some(start), Some(end)) = (earliest, latest) {
        return (start.as_hours(), end.as_hours());
    }
    let ticks = config.tick_times();
    let start = ticks.first().map(|t| t.as_hours()).unwrap_or(7.5);
    let end = ticks.last().map(|t| t.as_hours()).unwrap_or(18.0);
    (start, end)
}
