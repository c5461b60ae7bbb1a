use serde::Serialize;

use crate::ir::{Event, WEEK_DAYS};

/// Text color chosen for contrast against a filled event bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

/// One event with its computed geometry and colors.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedEvent {
    #[serde(flatten)]
    pub event: Event,
    /// Row within the event's day band.
    pub local_row: usize,
    /// Row in the stacked all-week coordinate space.
    pub global_row: usize,
    /// Name-hash fill used by the chart backend.
    pub hash_fill: String,
    /// Palette fill used by the fragment backend.
    pub palette_fill: &'static str,
    /// Text color paired with `palette_fill`.
    pub palette_text: TextColor,
}

impl PlacedEvent {
    /// Label lines in display order: header, then teachers and room when
    /// present.
    pub fn label_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} - {}", self.event.name, self.event.kind)];
        if !self.event.teachers.is_empty() {
            lines.push(self.event.teachers.clone());
        }
        if !self.event.room.is_empty() {
            lines.push(self.event.room.clone());
        }
        lines
    }
}

/// Vertical band reserved for one weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayBlock {
    pub day: usize,
    /// First global row of the band.
    pub offset: usize,
    /// Rows in the band, at least one.
    pub rows: usize,
}

/// Renderer-agnostic output of the layout pass. Both backends and the dump
/// read only this.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub placed: Vec<PlacedEvent>,
    pub days: [DayBlock; WEEK_DAYS],
    pub total_rows: usize,
    /// Left edge of the shared horizontal scale, fractional hours.
    pub time_start: f32,
    /// Right edge of the shared horizontal scale, fractional hours.
    pub time_end: f32,
    /// Chart canvas size in pixels, margins included.
    pub width: f32,
    pub height: f32,
}

impl Layout {
    pub fn time_span(&self) -> f32 {
        self.time_end - self.time_start
    }

    /// Horizontal position of a time as a fraction of the scale, in `0..=1`
    /// for times inside the scale.
    pub fn fraction_of(&self, hours: f32) -> f32 {
        (hours - self.time_start) / self.time_span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{EventKind, TimeOfDay};

    fn placed(name: &str, teachers: &str, room: &str) -> PlacedEvent {
        PlacedEvent {
            event: Event {
                name: name.to_string(),
                kind: EventKind::Lecture,
                day: 0,
                start: TimeOfDay::from_hm(9, 0).unwrap(),
                end: TimeOfDay::from_hm(10, 30).unwrap(),
                room: room.to_string(),
                teachers: teachers.to_string(),
                parity: None,
            },
            local_row: 0,
            global_row: 0,
            hash_fill: "#2d7116".to_string(),
            palette_fill: "#1f77b4",
            palette_text: TextColor::White,
        }
    }

    #[test]
    fn label_lines_skip_empty_fields() {
        let full = placed("BI-AG1", "Jan Novak", "T9:105");
        assert_eq!(full.label_lines(), vec!["BI-AG1 - P", "Jan Novak", "T9:105"]);
        let bare = placed("BI-AG1", "", "");
        assert_eq!(bare.label_lines(), vec!["BI-AG1 - P"]);
    }

    #[test]
    fn fraction_maps_scale_edges() {
        let layout = Layout {
            placed: Vec::new(),
            days: Default::default(),
            total_rows: WEEK_DAYS,
            time_start: 7.5,
            time_end: 18.0,
            width: 1200.0,
            height: 400.0,
        };
        assert_eq!(layout.fraction_of(7.5), 0.0);
        assert_eq!(layout.fraction_of(18.0), 1.0);
        assert!((layout.fraction_of(12.75) - 0.5).abs() < 1e-6);
    }
}
