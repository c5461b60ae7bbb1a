use crate::ir::{Event, EventKind, TimeOfDay, Timetable, WEEK_DAYS, WeekParity};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").unwrap());

/// Input-contract violations. Any of these aborts the whole render call;
/// timing fields feed ordering-sensitive code, so there is no partial output.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid event list JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event {index} ({name}): unparsable time {value:?}")]
    BadTime {
        index: usize,
        name: String,
        value: String,
    },

    #[error("event {index} ({name}): day {day} is outside the working week")]
    BadDay {
        index: usize,
        name: String,
        day: usize,
    },

    #[error("event {index} ({name}): start {start} is not before end {end}")]
    EmptyInterval {
        index: usize,
        name: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Wire shape of one event record. Field names match the records-service
/// ticket export, so fetched and file-based input share one format.
#[derive(Debug, Deserialize)]
struct EventRecord {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    day: usize,
    starttime: String,
    endtime: String,
    #[serde(default)]
    room: String,
    #[serde(default)]
    teachers: String,
    #[serde(default)]
    weeks: Option<String>,
}

/// Parse a `"HH:MM"` time-of-day string.
pub fn parse_time(value: &str) -> Option<TimeOfDay> {
    let caps = TIME_RE.captures(value.trim())?;
    let hour: u8 = caps[1].parse().ok()?;
    let minute: u8 = caps[2].parse().ok()?;
    TimeOfDay::from_hm(hour, minute)
}

/// Parse a JSON array of event records into a validated [`Timetable`].
pub fn parse_events(input: &str) -> ParseResult<Timetable> {
    let records: Vec<EventRecord> = serde_json::from_str(input)?;
    let mut events = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        events.push(build_event(index, record)?);
    }
    Ok(Timetable { events })
}

fn build_event(index: usize, record: EventRecord) -> ParseResult<Event> {
    let start = parse_time(&record.starttime).ok_or_else(|| ParseError::BadTime {
        index,
        name: record.name.clone(),
        value: record.starttime.clone(),
    })?;
    let end = parse_time(&record.endtime).ok_or_else(|| ParseError::BadTime {
        index,
        name: record.name.clone(),
        value: record.endtime.clone(),
    })?;
    if record.day >= WEEK_DAYS {
        return Err(ParseError::BadDay {
            index,
            name: record.name,
            day: record.day,
        });
    }
    if start >= end {
        return Err(ParseError::EmptyInterval {
            index,
            name: record.name,
            start,
            end,
        });
    }
    Ok(Event {
        kind: EventKind::from_token(&record.kind),
        name: record.name,
        day: record.day,
        start,
        end,
        room: record.room,
        teachers: record.teachers,
        parity: record.weeks.as_deref().and_then(WeekParity::from_token),
    })
}
