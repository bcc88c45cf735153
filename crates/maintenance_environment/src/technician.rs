use serde::Deserialize;
use serde::Serialize;

/// Designation label that makes a technician eligible for automatic
/// assignment.
pub const ENGINEER: &str = "engineer";

/// A record in the `task_allotment` collection. Used purely as a selection
/// pool; the record's document key is what gets written onto an assignment
/// as the assignee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TechnicianRecord
{
    #[serde(default)]
    employee_id: Option<String>,

    #[serde(default)]
    employee_name: Option<String>,

    designation: String,

    #[serde(default)]
    department: Option<String>,
}

impl TechnicianRecord
{
    pub fn new(designation: impl Into<String>, department: Option<String>) -> Self
    {
        Self {
            employee_id: None,
            employee_name: None,
            designation: designation.into(),
            department,
        }
    }

    pub fn employee_name(&self) -> Option<&str>
    {
        self.employee_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn designation(&self) -> &str
    {
        &self.designation
    }

    pub fn department(&self) -> Option<&str>
    {
        self.department.as_deref().filter(|department| !department.is_empty())
    }
}
