use super::types::DayBlock;
use crate::ir::WEEK_DAYS;

/// Stack per-day row counts into one vertical coordinate space.
///
/// A day with no events still reserves one row so every weekday stays visible
/// in the output. Returns the day bands and the total row count.
pub(super) fn stack_days(row_counts: &[usize; WEEK_DAYS]) -> ([DayBlock; WEEK_DAYS], usize) {
    let mut blocks = [DayBlock::default(); WEEK_DAYS];
    let mut offset = 0;
    for (day, &count) in row_counts.iter().enumerate() {
        let rows = count.max(1);
        blocks[day] = DayBlock { day, offset, rows };
        offset += rows;
    }
    (blocks, offset)
}
