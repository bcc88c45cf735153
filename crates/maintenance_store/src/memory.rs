use std::collections::BTreeMap;

use maintenance_environment::DueDate;
use maintenance_environment::assignment::Assignment;
use maintenance_environment::assignment::AssignmentStatus;
use maintenance_environment::equipment::EquipmentRecord;
use maintenance_environment::equipment::EquipmentTaskMapping;
use maintenance_environment::equipment::normalize_equipment_id;
use maintenance_environment::log::CompletionLog;
use maintenance_environment::log::LogStatus;
use maintenance_environment::task::TaskDefinition;
use maintenance_environment::technician::TechnicianRecord;
use tracing::debug;

use crate::DocumentKey;
use crate::InsertOutcome;
use crate::MaintenanceStore;
use crate::StoreError;

/// In-memory document store. The reference backend for tests and the
/// substitution point the generator is written against.
///
/// Collections are `BTreeMap`s keyed by document key, so equality queries
/// yield results in ascending key order. That makes technician selection
/// among equally-eligible candidates deterministic here; it is a property
/// of this backend, not of the [`MaintenanceStore`] contract.
#[derive(Debug, Default)]
pub struct InMemoryStore
{
    equipment: BTreeMap<DocumentKey, EquipmentRecord>,
    task_map: Vec<EquipmentTaskMapping>,
    tasks: BTreeMap<DocumentKey, TaskDefinition>,
    technicians: BTreeMap<DocumentKey, TechnicianRecord>,
    assignments: BTreeMap<DocumentKey, Assignment>,
    pending_logs: BTreeMap<DocumentKey, CompletionLog>,
    completion_logs: Vec<CompletionLog>,
    next_assignment_key: u64,
}

impl InMemoryStore
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn add_equipment(&mut self, key: impl Into<DocumentKey>, record: EquipmentRecord)
    {
        self.equipment.insert(key.into(), record);
    }

    pub fn add_mapping(&mut self, mapping: EquipmentTaskMapping)
    {
        self.task_map.push(mapping);
    }

    pub fn add_task(&mut self, task: TaskDefinition)
    {
        self.tasks.insert(task.task_id().to_string(), task);
    }

    pub fn add_technician(&mut self, key: impl Into<DocumentKey>, record: TechnicianRecord)
    {
        self.technicians.insert(key.into(), record);
    }

    pub fn add_completion_log(&mut self, log: CompletionLog)
    {
        self.completion_logs.push(log);
    }

    pub fn assignments(&self) -> impl Iterator<Item = (&DocumentKey, &Assignment)>
    {
        self.assignments.iter()
    }

    pub fn assignment_count(&self) -> usize
    {
        self.assignments.len()
    }

    pub fn completion_logs(&self) -> &[CompletionLog]
    {
        &self.completion_logs
    }
}

impl MaintenanceStore for InMemoryStore
{
    fn equipment(&self) -> Result<Vec<(DocumentKey, EquipmentRecord)>, StoreError>
    {
        Ok(self
            .equipment
            .iter()
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect())
    }

    fn mappings_for_equipment(&self, equipment_id: &str) -> Result<Vec<EquipmentTaskMapping>, StoreError>
    {
        let wanted = normalize_equipment_id(equipment_id);
        Ok(self
            .task_map
            .iter()
            .filter(|mapping| mapping.equipment_id_norm() == wanted)
            .cloned()
            .collect())
    }

    fn task_definition(&self, task_id: &str) -> Result<Option<TaskDefinition>, StoreError>
    {
        Ok(self.tasks.get(task_id).cloned())
    }

    fn latest_approved_log(&self, equipment_id: &str, task_id: &str) -> Result<Option<CompletionLog>, StoreError>
    {
        Ok(self
            .completion_logs
            .iter()
            .filter(|log| {
                log.equipment_id() == equipment_id && log.task_id() == task_id && log.status() == LogStatus::Approved
            })
            .max_by_key(|log| log.submitted_at())
            .cloned())
    }

    fn find_technician(&self, department: Option<&str>, designation: &str) -> Result<Option<DocumentKey>, StoreError>
    {
        Ok(self
            .technicians
            .iter()
            .find(|(_, technician)| {
                technician.designation() == designation
                    && department.is_none_or(|wanted| technician.department() == Some(wanted))
            })
            .map(|(key, _)| key.clone()))
    }

    fn create_assignment_if_absent(&mut self, assignment: Assignment) -> Result<InsertOutcome, StoreError>
    {
        let duplicate = self.assignments.values().any(|existing| {
            existing.equipment_id() == assignment.equipment_id()
                && existing.task_id() == assignment.task_id()
                && existing.due_date() == assignment.due_date()
        });
        if duplicate {
            debug!(
                equipment_id = assignment.equipment_id(),
                task_id = assignment.task_id(),
                "assignment already exists for this due date"
            );
            return Ok(InsertOutcome::AlreadyExists);
        }

        self.next_assignment_key += 1;
        let key = format!("asg-{}", self.next_assignment_key);
        self.assignments.insert(key.clone(), assignment);
        Ok(InsertOutcome::Created(key))
    }

    fn assignment(&self, key: &str) -> Result<Option<Assignment>, StoreError>
    {
        Ok(self.assignments.get(key).cloned())
    }

    fn set_assignment_status(&mut self, key: &str, status: AssignmentStatus) -> Result<(), StoreError>
    {
        let assignment = self.assignments.get_mut(key).ok_or_else(|| StoreError::NotFound {
            collection: "assignments",
            key: key.to_string(),
        })?;
        assignment.set_status(status);
        Ok(())
    }

    fn put_pending_log(&mut self, log: CompletionLog) -> Result<(), StoreError>
    {
        self.pending_logs.insert(log.log_id().to_string(), log);
        Ok(())
    }

    fn pending_log(&self, log_id: &str) -> Result<Option<CompletionLog>, StoreError>
    {
        Ok(self.pending_logs.get(log_id).cloned())
    }

    fn update_pending_log(&mut self, log: CompletionLog) -> Result<(), StoreError>
    {
        if !self.pending_logs.contains_key(log.log_id()) {
            return Err(StoreError::NotFound {
                collection: "pending_maintenance_logs",
                key: log.log_id().to_string(),
            });
        }
        self.pending_logs.insert(log.log_id().to_string(), log);
        Ok(())
    }

    fn remove_pending_log(&mut self, log_id: &str) -> Result<(), StoreError>
    {
        self.pending_logs.remove(log_id).ok_or_else(|| StoreError::NotFound {
            collection: "pending_maintenance_logs",
            key: log_id.to_string(),
        })?;
        Ok(())
    }

    fn put_completion_log(&mut self, log: CompletionLog) -> Result<(), StoreError>
    {
        self.completion_logs.push(log);
        Ok(())
    }

    fn assignment_exists(&self, equipment_id: &str, task_id: &str, due_date: DueDate) -> Result<bool, StoreError>
    {
        Ok(self.assignments.values().any(|existing| {
            existing.equipment_id() == equipment_id && existing.task_id() == task_id && existing.due_date() == due_date
        }))
    }
}
