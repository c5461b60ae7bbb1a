use crate::ir::Event;

/// Row assignment for the events of a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PackedDay {
    /// Local row index per event, parallel to the packed input slice.
    pub rows: Vec<usize>,
    /// Number of rows the day needs. Zero when the day has no events.
    pub row_count: usize,
}

/// Pack one day's events into the minimum number of non-overlapping rows.
///
/// Events must already be sorted by start time (stable, so input order breaks
/// ties). Each event goes to the lowest-indexed row whose last occupant ends
/// at or before the event's start; a row that ends exactly when the next
/// event starts is reusable.
pub(super) fn pack_rows(events: &[&Event]) -> PackedDay {
    let mut row_end = Vec::new();
    let mut rows = Vec::with_capacity(events.len());
    for event in events {
        let slot = row_end.iter().position(|&end| end <= event.start);
        match slot {
            Some(row) => {
                row_end[row] = event.end;
                rows.push(row);
            }
            None => {
                rows.push(row_end.len());
                row_end.push(event.end);
            }
        }
    }
    PackedDay {
        rows,
        row_count: row_end.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{EventKind, TimeOfDay};

    fn event(name: &str, start: (u8, u8), end: (u8, u8)) -> Event {
        Event {
            name: name.to_string(),
            kind: EventKind::Lecture,
            day: 0,
            start: TimeOfDay::from_hm(start.0, start.1).unwrap(),
            end: TimeOfDay::from_hm(end.0, end.1).unwrap(),
            room: String::new(),
            teachers: String::new(),
            parity: None,
        }
    }

    fn pack(events: &[Event]) -> PackedDay {
        let refs: Vec<&Event> = events.iter().collect();
        pack_rows(&refs)
    }

    #[test]
    fn empty_day_has_no_rows() {
        let packed = pack(&[]);
        assert_eq!(packed.row_count, 0);
        assert!(packed.rows.is_empty());
    }

    #[test]
    fn disjoint_events_share_one_row() {
        let events = [
            event("a", (9, 0), (10, 0)),
            event("b", (11, 0), (12, 0)),
            event("c", (14, 0), (15, 0)),
        ];
        let packed = pack(&events);
        assert_eq!(packed.rows, vec![0, 0, 0]);
        assert_eq!(packed.row_count, 1);
    }

    #[test]
    fn overlap_opens_a_second_row() {
        let events = [event("a", (9, 0), (11, 0)), event("b", (10, 0), (12, 0))];
        let packed = pack(&events);
        assert_eq!(packed.rows, vec![0, 1]);
        assert_eq!(packed.row_count, 2);
    }

    #[test]
    fn touching_boundary_reuses_the_row() {
        let events = [event("a", (9, 0), (10, 30)), event("b", (10, 30), (12, 0))];
        let packed = pack(&events);
        assert_eq!(packed.rows, vec![0, 0]);
        assert_eq!(packed.row_count, 1);
    }

    #[test]
    fn freed_row_is_preferred_over_a_new_one() {
        // a and b overlap; c starts after a ends, so it takes row 0 back
        // even though row 1 is also free by then.
        let events = [
            event("a", (9, 0), (10, 0)),
            event("b", (9, 30), (10, 15)),
            event("c", (10, 0), (11, 0)),
        ];
        let packed = pack(&events);
        assert_eq!(packed.rows, vec![0, 1, 0]);
        assert_eq!(packed.row_count, 2);
    }

    #[test]
    fn triple_overlap_needs_three_rows() {
        let events = [
            event("a", (9, 0), (12, 0)),
            event("b", (9, 30), (11, 0)),
            event("c", (10, 0), (10, 45)),
        ];
        let packed = pack(&events);
        assert_eq!(packed.rows, vec![0, 1, 2]);
        assert_eq!(packed.row_count, 3);
    }
}
