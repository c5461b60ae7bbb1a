use crate::ir::DAY_NAMES;
use crate::layout::{Layout, TextColor};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Machine-readable view of the render model, one entry per placed event
/// plus the day bands. Pretty-printed so diffs stay reviewable.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub total_rows: usize,
    pub time_start: f32,
    pub time_end: f32,
    pub width: f32,
    pub height: f32,
    pub days: Vec<DayDump>,
    pub events: Vec<EventDump>,
}

#[derive(Debug, Serialize)]
pub struct DayDump {
    pub day: usize,
    pub name: &'static str,
    pub offset: usize,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct EventDump {
    pub name: String,
    pub kind: String,
    pub day: usize,
    pub start: String,
    pub end: String,
    pub room: String,
    pub teachers: String,
    pub parity: Option<String>,
    pub local_row: usize,
    pub global_row: usize,
    pub hash_fill: String,
    pub palette_fill: String,
    pub palette_text: TextColor,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let days = layout
            .days
            .iter()
            .map(|block| DayDump {
                day: block.day,
                name: DAY_NAMES[block.day],
                offset: block.offset,
                rows: block.rows,
            })
            .collect();

        let events = layout
            .placed
            .iter()
            .map(|placed| EventDump {
                name: placed.event.name.clone(),
                kind: placed.event.kind.label_code().to_string(),
                day: placed.event.day,
                start: placed.event.start.to_string(),
                end: placed.event.end.to_string(),
                room: placed.event.room.clone(),
                teachers: placed.event.teachers.clone(),
                parity: placed.event.parity.map(|p| format!("{p:?}").to_lowercase()),
                local_row: placed.local_row,
                global_row: placed.global_row,
                hash_fill: placed.hash_fill.clone(),
                palette_fill: placed.palette_fill.to_string(),
                palette_text: placed.palette_text,
            })
            .collect();

        LayoutDump {
            total_rows: layout.total_rows,
            time_start: layout.time_start,
            time_end: layout.time_end,
            width: layout.width,
            height: layout.height,
            days,
            events,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
