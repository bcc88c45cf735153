use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

use crate::DueDate;

/// Assigner value written onto every assignment the generator creates.
pub const SYSTEM_ASSIGNER: &str = "system";

/// Wire value for an assignment nobody could be found for.
const UNASSIGNED: &str = "unassigned";

/// Who an assignment is handed to. On the wire this is either a technician
/// document key or the literal sentinel `"unassigned"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Assignee
{
    Technician(String),
    Unassigned,
}

impl From<Assignee> for String
{
    fn from(assignee: Assignee) -> Self
    {
        match assignee {
            Assignee::Technician(key) => key,
            Assignee::Unassigned => UNASSIGNED.to_string(),
        }
    }
}

impl From<String> for Assignee
{
    fn from(raw: String) -> Self
    {
        if raw == UNASSIGNED {
            Assignee::Unassigned
        } else {
            Assignee::Technician(raw)
        }
    }
}

/// Lifecycle of an assignment. The generator only ever writes `Open`;
/// the submission and review workflows drive the rest, including the
/// return to `Open` when a submission is rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus
{
    Open,
    Submitted,
    Completed,
}

/// A record in the `assignments` collection, the only entity this system
/// creates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Assignment
{
    equipment_id: String,
    task_id: String,

    /// Task title denormalized at creation time.
    task_title: String,

    assigned_to: Assignee,
    assigned_by: String,
    status: AssignmentStatus,
    created_at: NaiveDateTime,
    due_date: DueDate,
}

impl Assignment
{
    /// Build the open assignment the generator writes for a due
    /// (equipment, task) pair.
    pub fn open(
        equipment_id: impl Into<String>,
        task_id: impl Into<String>,
        task_title: impl Into<String>,
        assigned_to: Assignee,
        created_at: NaiveDateTime,
        due_date: DueDate,
    ) -> Self
    {
        Self {
            equipment_id: equipment_id.into(),
            task_id: task_id.into(),
            task_title: task_title.into(),
            assigned_to,
            assigned_by: SYSTEM_ASSIGNER.to_string(),
            status: AssignmentStatus::Open,
            created_at,
            due_date,
        }
    }

    pub fn equipment_id(&self) -> &str
    {
        &self.equipment_id
    }

    pub fn task_id(&self) -> &str
    {
        &self.task_id
    }

    pub fn task_title(&self) -> &str
    {
        &self.task_title
    }

    pub fn assigned_to(&self) -> &Assignee
    {
        &self.assigned_to
    }

    pub fn assigned_by(&self) -> &str
    {
        &self.assigned_by
    }

    pub fn status(&self) -> AssignmentStatus
    {
        self.status
    }

    pub fn created_at(&self) -> NaiveDateTime
    {
        self.created_at
    }

    pub fn due_date(&self) -> DueDate
    {
        self.due_date
    }

    pub fn set_status(&mut self, status: AssignmentStatus)
    {
        self.status = status;
    }
}
