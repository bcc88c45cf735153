use chrono::Days;
use chrono::NaiveDate;

use crate::DueDate;

/// What anchors the next occurrence of an (equipment, task) pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScheduleAnchor
{
    /// Date of the most recent approved completion log.
    LastApproved(NaiveDate),

    /// Equipment commissioning date, used when no approved history exists.
    Commissioned(NaiveDate),
}

/// Compute the next due date for a task with `frequency_days` from its
/// anchor.
///
/// From an approved completion the next occurrence is one frequency later.
/// From a commissioning date the schedule is anchored to fixed cycle
/// boundaries: with `cycles = elapsed_days / frequency_days` (whole days,
/// truncating), the result is `start + (cycles + 1) * frequency_days` - the
/// single next unmet boundary, never one occurrence per missed cycle. A
/// commissioning date in the future yields the first boundary after it.
pub fn next_due(anchor: ScheduleAnchor, frequency_days: u32, today: NaiveDate) -> DueDate
{
    let date = match anchor {
        ScheduleAnchor::LastApproved(last) => last + Days::new(u64::from(frequency_days)),
        ScheduleAnchor::Commissioned(start) => {
            let elapsed_days = (today - start).num_days().max(0);
            let cycles = elapsed_days / i64::from(frequency_days);
            start + Days::new((cycles as u64 + 1) * u64::from(frequency_days))
        }
    };

    DueDate::from_date(date)
}

/// A due date triggers assignment creation when it is on or before the
/// cutoff, `today + lead_days`.
pub fn is_due(next_due: DueDate, today: NaiveDate, lead_days: u32) -> bool
{
    let cutoff = today + Days::new(u64::from(lead_days));
    next_due.date() <= cutoff
}
