use chrono::NaiveDateTime;
use maintenance_environment::assignment::AssignmentStatus;
use maintenance_environment::log::CompletionLog;
use maintenance_store::MaintenanceStore;
use maintenance_store::StoreError;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReviewError
{
    #[error("pending log {0} not found")]
    PendingLogMissing(String),

    #[error("log {0} carries no assignment reference")]
    AssignmentMissing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A technician hands in a completed checklist. The log lands in the
/// pending collection and the assignment leaves the open pool until a
/// manager has looked at it. The assignment is transitioned first, so a
/// submission against an unknown assignment fails without leaving a
/// stray pending log behind.
pub fn submit_completion<S: MaintenanceStore>(store: &mut S, log: CompletionLog) -> Result<(), ReviewError>
{
    let assignment_key = log
        .assignment_id()
        .ok_or_else(|| ReviewError::AssignmentMissing(log.log_id().to_string()))?
        .to_string();

    store.set_assignment_status(&assignment_key, AssignmentStatus::Submitted)?;
    store.put_pending_log(log)?;
    Ok(())
}

/// Manager approval. The log is copied into the permanent collection with
/// status approved - from then on it anchors the pair's next due date -
/// the pending copy is removed, and the assignment completes.
pub fn approve_submission<S: MaintenanceStore>(
    store: &mut S,
    log_id: &str,
    comments: Option<String>,
    reviewed_at: NaiveDateTime,
) -> Result<(), ReviewError>
{
    let pending = store
        .pending_log(log_id)?
        .ok_or_else(|| ReviewError::PendingLogMissing(log_id.to_string()))?;

    let assignment_key = pending.assignment_id().map(str::to_string);
    let approved = pending.approve(comments, reviewed_at);

    store.put_completion_log(approved)?;
    store.remove_pending_log(log_id)?;

    if let Some(key) = assignment_key {
        store.set_assignment_status(&key, AssignmentStatus::Completed)?;
    }

    info!(log_id, "submission approved");
    Ok(())
}

/// Manager rejection. The log stays pending, marked rejected with the
/// manager's comments, and the assignment reopens for rework. Rejected
/// logs never feed the due-date computation.
pub fn reject_submission<S: MaintenanceStore>(
    store: &mut S,
    log_id: &str,
    comments: Option<String>,
    reviewed_at: NaiveDateTime,
) -> Result<(), ReviewError>
{
    let pending = store
        .pending_log(log_id)?
        .ok_or_else(|| ReviewError::PendingLogMissing(log_id.to_string()))?;

    let assignment_key = pending.assignment_id().map(str::to_string);
    let rejected = pending.reject(comments, reviewed_at);

    store.update_pending_log(rejected)?;

    if let Some(key) = assignment_key {
        store.set_assignment_status(&key, AssignmentStatus::Open)?;
    }

    info!(log_id, "submission rejected, assignment reopened");
    Ok(())
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;
    use chrono::NaiveDateTime;
    use maintenance_environment::DueDate;
    use maintenance_environment::assignment::Assignee;
    use maintenance_environment::assignment::Assignment;
    use maintenance_environment::assignment::AssignmentStatus;
    use maintenance_environment::log::ChecklistItem;
    use maintenance_environment::log::CompletionLog;
    use maintenance_environment::log::LogStatus;
    use maintenance_store::InsertOutcome;
    use maintenance_store::MaintenanceStore;
    use maintenance_store::memory::InMemoryStore;

    use super::ReviewError;
    use super::approve_submission;
    use super::reject_submission;
    use super::submit_completion;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime
    {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn store_with_open_assignment() -> (InMemoryStore, String)
    {
        let mut store = InMemoryStore::new();
        let due = DueDate::from_date(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        let assignment = Assignment::open(
            "PUMP-1",
            "T1",
            "Check oil level",
            Assignee::Technician("tech-7".to_string()),
            at(2024, 3, 31, 6),
            due,
        );
        let outcome = store.create_assignment_if_absent(assignment).unwrap();
        let InsertOutcome::Created(key) = outcome else {
            panic!("fresh store refused the assignment");
        };
        (store, key)
    }

    fn submission(assignment_key: &str) -> CompletionLog
    {
        CompletionLog::submitted("log-1", assignment_key, "PUMP-1", "T1", "tech-7", at(2024, 3, 31, 10))
            .with_checklist(vec![ChecklistItem {
                label: "Check oil level".to_string(),
                checked: true,
            }])
            .with_vibration(2.4)
    }

    #[test]
    fn test_submit_moves_assignment_out_of_open()
    {
        let (mut store, key) = store_with_open_assignment();

        submit_completion(&mut store, submission(&key)).unwrap();

        let assignment = store.assignment(&key).unwrap().unwrap();
        assert_eq!(assignment.status(), AssignmentStatus::Submitted);
        assert_eq!(store.pending_log("log-1").unwrap().unwrap().status(), LogStatus::Submitted);
    }

    #[test]
    fn test_approve_promotes_log_and_completes_assignment()
    {
        let (mut store, key) = store_with_open_assignment();
        submit_completion(&mut store, submission(&key)).unwrap();

        approve_submission(&mut store, "log-1", Some("ok".to_string()), at(2024, 4, 1, 9)).unwrap();

        assert!(store.pending_log("log-1").unwrap().is_none());
        assert_eq!(store.assignment(&key).unwrap().unwrap().status(), AssignmentStatus::Completed);

        let approved = store.latest_approved_log("PUMP-1", "T1").unwrap().unwrap();
        assert_eq!(approved.status(), LogStatus::Approved);
        assert_eq!(approved.submitted_at(), at(2024, 3, 31, 10));
    }

    #[test]
    fn test_reject_reopens_assignment_and_keeps_log_pending()
    {
        let (mut store, key) = store_with_open_assignment();
        submit_completion(&mut store, submission(&key)).unwrap();

        reject_submission(&mut store, "log-1", Some("photo missing".to_string()), at(2024, 4, 1, 9)).unwrap();

        let assignment = store.assignment(&key).unwrap().unwrap();
        assert_eq!(assignment.status(), AssignmentStatus::Open);

        let pending = store.pending_log("log-1").unwrap().unwrap();
        assert_eq!(pending.status(), LogStatus::Rejected);
        assert_eq!(pending.manager_comments(), Some("photo missing"));

        // A rejected log contributes nothing to scheduling.
        assert!(store.latest_approved_log("PUMP-1", "T1").unwrap().is_none());
    }

    #[test]
    fn test_submit_against_unknown_assignment_leaves_no_pending_log()
    {
        let mut store = InMemoryStore::new();

        let result = submit_completion(&mut store, submission("asg-404"));

        assert!(matches!(result, Err(ReviewError::Store(_))));
        assert!(store.pending_log("log-1").unwrap().is_none());
    }

    #[test]
    fn test_review_of_unknown_log_is_an_error()
    {
        let mut store = InMemoryStore::new();
        let result = approve_submission(&mut store, "log-404", None, at(2024, 4, 1, 9));
        assert!(matches!(result, Err(ReviewError::PendingLogMissing(_))));
    }
}
