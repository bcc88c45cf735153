use chrono::FixedOffset;
use chrono::NaiveDateTime;
use chrono::Utc;
use maintenance_environment::assignment::Assignee;
use maintenance_environment::assignment::Assignment;
use maintenance_environment::schedule::ScheduleAnchor;
use maintenance_environment::schedule::is_due;
use maintenance_environment::schedule::next_due;
use maintenance_environment::technician::ENGINEER;
use maintenance_store::InsertOutcome;
use maintenance_store::MaintenanceStore;
use maintenance_store::StoreError;
use tracing::debug;
use tracing::info;

pub mod review;

/// Options for one generator run.
#[derive(Clone, Debug)]
pub struct GeneratorOptions
{
    /// Days of lookahead: assignments are created for due dates up to
    /// `today + lead_days`. The production schedule has always run with 0.
    lead_days: u32,

    /// Fixed offset defining the calendar-day boundary for "today".
    utc_offset: FixedOffset,
}

impl Default for GeneratorOptions
{
    fn default() -> Self
    {
        Self {
            lead_days: 0,
            // The plant scheduler runs on IST.
            utc_offset: FixedOffset::east_opt(5 * 3600 + 30 * 60).expect("offset within bounds"),
        }
    }
}

impl GeneratorOptions
{
    pub fn with_lead_days(mut self, lead_days: u32) -> Self
    {
        self.lead_days = lead_days;
        self
    }

    pub fn with_utc_offset(mut self, utc_offset: FixedOffset) -> Self
    {
        self.utc_offset = utc_offset;
        self
    }

    pub fn lead_days(&self) -> u32
    {
        self.lead_days
    }
}

/// What one run did, for the scheduler's log line. The run either completes
/// with these counts or aborts on the first store fault.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary
{
    /// Assignments written this run.
    pub created: usize,

    /// Pairs whose (equipment, task, due date) assignment already existed.
    pub duplicates: usize,

    /// Pairs with a computed due date after the cutoff.
    pub not_due: usize,

    /// Pairs with no task definition, no usable frequency, or no anchor to
    /// schedule from.
    pub unschedulable: usize,
}

/// Run the generator at the current wall-clock time in the configured
/// time zone.
pub fn run<S: MaintenanceStore>(store: &mut S, options: &GeneratorOptions) -> Result<RunSummary, StoreError>
{
    let now = Utc::now().with_timezone(&options.utc_offset).naive_local();
    run_at(store, options, now)
}

/// Run the generator as of an explicit "now". One pass over every
/// (equipment, task) pair: compute the next due date, create the assignment
/// when it is on or before the cutoff and none exists for that due date
/// yet. Missing reference data is not an error, the pair is just not yet
/// schedulable; a store fault aborts the remainder of the run.
pub fn run_at<S: MaintenanceStore>(store: &mut S, options: &GeneratorOptions, now: NaiveDateTime) -> Result<RunSummary, StoreError>
{
    let today = now.date();
    let mut summary = RunSummary::default();

    for (document_key, equipment) in store.equipment()? {
        let equipment_id = equipment.equipment_id().unwrap_or(&document_key).to_string();

        for mapping in store.mappings_for_equipment(&equipment_id)? {
            let Some(task_id) = mapping.task_id() else {
                summary.unschedulable += 1;
                continue;
            };

            let Some(task) = store.task_definition(task_id)? else {
                debug!(equipment_id, task_id, "no task definition, skipping");
                summary.unschedulable += 1;
                continue;
            };

            let Some(frequency_days) = task.frequency_days() else {
                debug!(equipment_id, task_id, "task is not schedule-driven, skipping");
                summary.unschedulable += 1;
                continue;
            };

            let last_approved = store.latest_approved_log(&equipment_id, task_id)?;
            let anchor = match (last_approved, equipment.start_date()) {
                (Some(log), _) => ScheduleAnchor::LastApproved(log.submitted_at().date()),
                (None, Some(start_date)) => ScheduleAnchor::Commissioned(start_date),
                (None, None) => {
                    debug!(equipment_id, task_id, "no approved log and no start date, skipping");
                    summary.unschedulable += 1;
                    continue;
                }
            };

            let due_date = next_due(anchor, frequency_days, today);
            if !is_due(due_date, today, options.lead_days) {
                summary.not_due += 1;
                continue;
            }

            let assignee = select_assignee(store, equipment.department())?;
            let assignment = Assignment::open(&equipment_id, task_id, task.title(), assignee, now, due_date);

            match store.create_assignment_if_absent(assignment)? {
                InsertOutcome::Created(key) => {
                    info!(equipment_id, task_id, due_date = %due_date.date(), assignment = key, "assignment created");
                    summary.created += 1;
                }
                InsertOutcome::AlreadyExists => {
                    summary.duplicates += 1;
                }
            }
        }
    }

    info!(
        created = summary.created,
        duplicates = summary.duplicates,
        not_due = summary.not_due,
        unschedulable = summary.unschedulable,
        "generator run complete"
    );

    Ok(summary)
}

/// Role-based technician selection, first match wins: an engineer from the
/// equipment's own department, then any engineer, then nobody.
fn select_assignee<S: MaintenanceStore>(store: &S, department: Option<&str>) -> Result<Assignee, StoreError>
{
    if let Some(department) = department
        && let Some(key) = store.find_technician(Some(department), ENGINEER)?
    {
        return Ok(Assignee::Technician(key));
    }

    if let Some(key) = store.find_technician(None, ENGINEER)? {
        return Ok(Assignee::Technician(key));
    }

    Ok(Assignee::Unassigned)
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;
    use chrono::NaiveDateTime;
    use maintenance_environment::assignment::Assignee;
    use maintenance_environment::equipment::EquipmentRecord;
    use maintenance_environment::equipment::EquipmentTaskMapping;
    use maintenance_environment::log::CompletionLog;
    use maintenance_environment::task::TaskDefinition;
    use maintenance_environment::technician::TechnicianRecord;
    use maintenance_store::memory::InMemoryStore;

    use super::GeneratorOptions;
    use super::run_at;
    use super::select_assignee;

    fn noon(year: i32, month: u32, day: u32) -> NaiveDateTime
    {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn test_select_assignee_prefers_departmental_engineer()
    {
        let mut store = InMemoryStore::new();
        store.add_technician("tech-a", TechnicianRecord::new("engineer", Some("Packing".to_string())));
        store.add_technician("tech-b", TechnicianRecord::new("engineer", Some("Utilities".to_string())));

        let assignee = select_assignee(&store, Some("Utilities")).unwrap();
        assert_eq!(assignee, Assignee::Technician("tech-b".to_string()));
    }

    #[test]
    fn test_select_assignee_falls_back_to_any_engineer()
    {
        let mut store = InMemoryStore::new();
        store.add_technician("tech-a", TechnicianRecord::new("engineer", Some("Packing".to_string())));

        let no_department = select_assignee(&store, None).unwrap();
        assert_eq!(no_department, Assignee::Technician("tech-a".to_string()));

        let other_department = select_assignee(&store, Some("Utilities")).unwrap();
        assert_eq!(other_department, Assignee::Technician("tech-a".to_string()));
    }

    #[test]
    fn test_select_assignee_without_any_engineer_is_unassigned()
    {
        let mut store = InMemoryStore::new();
        store.add_technician("tech-a", TechnicianRecord::new("manager", Some("Utilities".to_string())));

        assert_eq!(select_assignee(&store, Some("Utilities")).unwrap(), Assignee::Unassigned);
    }

    #[test]
    fn test_equipment_identifier_falls_back_to_document_key()
    {
        let mut store = InMemoryStore::new();
        store.add_equipment("PUMP-1", EquipmentRecord::new(None, None, None));
        store.add_mapping(EquipmentTaskMapping::new("PUMP-1", "T1"));
        store.add_task(TaskDefinition::new("T1", "Check oil level", Some(30)));

        let approved = CompletionLog::submitted("log-1", "asg-0", "PUMP-1", "T1", "tech-1", noon(2024, 3, 1))
            .approve(None, noon(2024, 3, 2));
        store.add_completion_log(approved);

        // The record has no equipment_id field; lookups run on the
        // document key instead.
        let summary = run_at(&mut store, &GeneratorOptions::default(), noon(2024, 3, 31)).unwrap();

        assert_eq!(summary.created, 1);
        let (_, assignment) = store.assignments().next().unwrap();
        assert_eq!(assignment.equipment_id(), "PUMP-1");
    }

    #[test]
    fn test_mapping_without_task_definition_is_skipped()
    {
        let mut store = InMemoryStore::new();
        store.add_equipment(
            "PUMP-1",
            EquipmentRecord::new(None, None, NaiveDate::from_ymd_opt(2024, 1, 1)),
        );
        store.add_mapping(EquipmentTaskMapping::new("PUMP-1", "T-MISSING"));

        let summary = run_at(&mut store, &GeneratorOptions::default(), noon(2024, 3, 31)).unwrap();

        assert_eq!(summary.created, 0);
        assert_eq!(summary.unschedulable, 1);
    }
}
