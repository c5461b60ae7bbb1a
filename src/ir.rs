use serde::{Serialize, Serializer};
use std::fmt;

/// Number of weekdays in the working week.
pub const WEEK_DAYS: usize = 5;

pub const DAY_NAMES: [&str; WEEK_DAYS] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Minutes since midnight, always in `0..1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self(hour as u16 * 60 + minute as u16))
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn total_minutes(self) -> u16 {
        self.0
    }

    /// Fractional hours, the unit both backends lay geometry out in.
    pub fn as_hours(self) -> f32 {
        self.0 as f32 / 60.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Session kind as reported by the records service. Unrecognized tokens are
/// preserved verbatim so labels can show them unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Lecture,
    Seminar,
    Lab,
    Other(String),
}

impl EventKind {
    pub fn from_token(token: &str) -> Self {
        match token {
            "P" | "lecture" => Self::Lecture,
            "C" | "seminar" => Self::Seminar,
            "L" | "lab" => Self::Lab,
            other => Self::Other(other.to_string()),
        }
    }

    /// CSS class for the HTML backend. Unknown kinds get the generic class.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Lecture => "ctm-event-lecture",
            Self::Seminar => "ctm-event-seminar",
            Self::Lab => "ctm-event-lab",
            Self::Other(_) => "ctm-event-other",
        }
    }

    /// Short code shown in rendered labels.
    pub fn label_code(&self) -> &str {
        match self {
            Self::Lecture => "P",
            Self::Seminar => "C",
            Self::Lab => "L",
            Self::Other(token) => token,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label_code())
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label_code())
    }
}

/// Odd/even-week tag. Parsed and carried through, never consulted by layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekParity {
    Odd,
    Even,
    Every,
}

impl WeekParity {
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "odd" => Some(Self::Odd),
            "even" => Some(Self::Even),
            "every" | "both" => Some(Self::Every),
            _ => None,
        }
    }
}

/// One scheduled occurrence of a course session.
///
/// `start < end` is guaranteed by the constructors in `parser` and `records`;
/// `day` is always a valid index into [`DAY_NAMES`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub name: String,
    pub kind: EventKind,
    pub day: usize,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub room: String,
    pub teachers: String,
    pub parity: Option<WeekParity>,
}

impl Event {
    pub fn duration_hours(&self) -> f32 {
        self.end.as_hours() - self.start.as_hours()
    }
}

/// Ordered event list. Input order is significant: it breaks start-time ties
/// during packing and fixes the palette assignment order.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    pub events: Vec<Event>,
}

impl Timetable {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Distinct course names in first-seen order.
    pub fn distinct_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for event in &self.events {
            if !names.contains(&event.name.as_str()) {
                names.push(event.name.as_str());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_of_day_bounds() {
        assert!(TimeOfDay::from_hm(23, 59).is_some());
        assert!(TimeOfDay::from_hm(24, 0).is_none());
        assert!(TimeOfDay::from_hm(9, 60).is_none());
    }

    #[test]
    fn time_of_day_display_round_trip() {
        let t = TimeOfDay::from_hm(7, 5).unwrap();
        assert_eq!(t.to_string(), "07:05");
        assert_eq!(t.as_hours(), 7.0 + 5.0 / 60.0);
    }

    #[test]
    fn event_kind_tokens() {
        assert_eq!(EventKind::from_token("P"), EventKind::Lecture);
        assert_eq!(EventKind::from_token("lab"), EventKind::Lab);
        let other = EventKind::from_token("R");
        assert_eq!(other.css_class(), "ctm-event-other");
        assert_eq!(other.label_code(), "R");
    }

    #[test]
    fn distinct_names_first_seen_order() {
        let mk = |name: &str| Event {
            name: name.to_string(),
            kind: EventKind::Lecture,
            day: 0,
            start: TimeOfDay::from_hm(9, 0).unwrap(),
            end: TimeOfDay::from_hm(10, 0).unwrap(),
            room: String::new(),
            teachers: String::new(),
            parity: None,
        };
        let timetable = Timetable {
            events: vec![mk("B"), mk("A"), mk("B"), mk("C"), mk("A")],
        };
        assert_eq!(timetable.distinct_names(), vec!["B", "A", "C"]);
    }
}
