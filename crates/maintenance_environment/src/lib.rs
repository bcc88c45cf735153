use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

pub mod assignment;
pub mod equipment;
pub mod log;
pub mod schedule;
pub mod task;
pub mod technician;

/// Calendar day on which a task's next occurrence should be performed.
/// The time-of-day component is always stripped before comparison or
/// storage, so identity on (equipment, task, due date) is exact.
#[derive(Hash, Copy, Clone, Debug, PartialEq, PartialOrd, Ord, Eq, Serialize, Deserialize)]
pub struct DueDate(NaiveDate);

impl DueDate
{
    pub fn from_date(date: NaiveDate) -> Self
    {
        Self(date)
    }

    pub fn from_datetime(datetime: NaiveDateTime) -> Self
    {
        Self(datetime.date())
    }

    pub fn date(&self) -> NaiveDate
    {
        self.0
    }
}
