use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;

/// Review state of a submitted completion log.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus
{
    Submitted,
    Approved,
    Rejected,
}

/// One line of the checklist a technician ticks off in the field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem
{
    pub label: String,
    pub checked: bool,
}

impl ChecklistItem
{
    pub fn unchecked(label: impl Into<String>) -> Self
    {
        Self {
            label: label.into(),
            checked: false,
        }
    }
}

/// GPS evidence captured at submission time.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint
{
    pub lat: f64,
    pub lon: f64,
}

/// A completion log. Lives in `pending_maintenance_logs` between submission
/// and review; an approved copy is written to `maintenance_logs`, and only
/// that approved copy counts toward the next due date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompletionLog
{
    log_id: String,

    #[serde(default)]
    assignment_id: Option<String>,

    equipment_id: String,
    task_id: String,

    #[serde(default)]
    technician_id: Option<String>,

    status: LogStatus,
    submitted_at: NaiveDateTime,

    #[serde(default)]
    checklist: Vec<ChecklistItem>,

    #[serde(default)]
    vibration: Option<f64>,

    #[serde(default)]
    images: Vec<String>,

    #[serde(default)]
    gps: Option<GpsPoint>,

    #[serde(default)]
    manager_comments: Option<String>,

    #[serde(default)]
    reviewed_at: Option<NaiveDateTime>,

    #[serde(default)]
    approved_at: Option<NaiveDateTime>,
}

impl CompletionLog
{
    /// A fresh submission from a technician, awaiting review.
    pub fn submitted(
        log_id: impl Into<String>,
        assignment_id: impl Into<String>,
        equipment_id: impl Into<String>,
        task_id: impl Into<String>,
        technician_id: impl Into<String>,
        submitted_at: NaiveDateTime,
    ) -> Self
    {
        Self {
            log_id: log_id.into(),
            assignment_id: Some(assignment_id.into()),
            equipment_id: equipment_id.into(),
            task_id: task_id.into(),
            technician_id: Some(technician_id.into()),
            status: LogStatus::Submitted,
            submitted_at,
            checklist: vec![],
            vibration: None,
            images: vec![],
            gps: None,
            manager_comments: None,
            reviewed_at: None,
            approved_at: None,
        }
    }

    pub fn with_checklist(mut self, checklist: Vec<ChecklistItem>) -> Self
    {
        self.checklist = checklist;
        self
    }

    pub fn with_vibration(mut self, vibration: f64) -> Self
    {
        self.vibration = Some(vibration);
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self
    {
        self.images = images;
        self
    }

    pub fn with_gps(mut self, gps: GpsPoint) -> Self
    {
        self.gps = Some(gps);
        self
    }

    pub fn log_id(&self) -> &str
    {
        &self.log_id
    }

    pub fn assignment_id(&self) -> Option<&str>
    {
        self.assignment_id.as_deref()
    }

    pub fn equipment_id(&self) -> &str
    {
        &self.equipment_id
    }

    pub fn task_id(&self) -> &str
    {
        &self.task_id
    }

    pub fn status(&self) -> LogStatus
    {
        self.status
    }

    pub fn submitted_at(&self) -> NaiveDateTime
    {
        self.submitted_at
    }

    pub fn checklist(&self) -> &[ChecklistItem]
    {
        &self.checklist
    }

    pub fn manager_comments(&self) -> Option<&str>
    {
        self.manager_comments.as_deref()
    }

    /// Transition into the approved copy written to `maintenance_logs`.
    pub fn approve(mut self, comments: Option<String>, approved_at: NaiveDateTime) -> Self
    {
        self.status = LogStatus::Approved;
        self.manager_comments = comments;
        self.approved_at = Some(approved_at);
        self
    }

    /// Mark the pending copy rejected and send it back for rework.
    pub fn reject(mut self, comments: Option<String>, reviewed_at: NaiveDateTime) -> Self
    {
        self.status = LogStatus::Rejected;
        self.manager_comments = comments;
        self.reviewed_at = Some(reviewed_at);
        self
    }
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;

    use super::ChecklistItem;
    use super::CompletionLog;
    use super::LogStatus;

    fn submitted_log() -> CompletionLog
    {
        let submitted_at = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(10, 30, 0).unwrap();
        CompletionLog::submitted("log-1", "asg-1", "PUMP-1", "T1", "tech-7", submitted_at)
            .with_checklist(vec![ChecklistItem::unchecked("Check oil level")])
            .with_vibration(2.4)
    }

    #[test]
    fn test_approve_sets_status_and_timestamp()
    {
        let reviewed = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let approved = submitted_log().approve(Some("ok".to_string()), reviewed);

        assert_eq!(approved.status(), LogStatus::Approved);
        assert_eq!(approved.manager_comments(), Some("ok"));
        assert_eq!(approved.approved_at, Some(reviewed));
        // submission timestamp is what the scheduler anchors on, untouched
        assert_eq!(approved.submitted_at().date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_reject_keeps_log_pending_shape()
    {
        let reviewed = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap().and_hms_opt(9, 0, 0).unwrap();
        let rejected = submitted_log().reject(None, reviewed);

        assert_eq!(rejected.status(), LogStatus::Rejected);
        assert_eq!(rejected.reviewed_at, Some(reviewed));
        assert_eq!(rejected.approved_at, None);
    }

    #[test]
    fn test_decode_minimal_wire_log()
    {
        let log: CompletionLog = serde_json::from_str(
            r#"{
                "log_id": "log-1",
                "equipment_id": "PUMP-1",
                "task_id": "T1",
                "status": "approved",
                "submitted_at": "2024-03-01T10:30:00"
            }"#,
        )
        .unwrap();

        assert_eq!(log.status(), LogStatus::Approved);
        assert!(log.checklist().is_empty());
    }
}
