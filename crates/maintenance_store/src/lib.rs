use maintenance_environment::DueDate;
use maintenance_environment::assignment::Assignment;
use maintenance_environment::assignment::AssignmentStatus;
use maintenance_environment::equipment::EquipmentRecord;
use maintenance_environment::equipment::EquipmentTaskMapping;
use maintenance_environment::log::CompletionLog;
use maintenance_environment::task::TaskDefinition;
use thiserror::Error;

pub mod memory;

/// Identifier assigned to a document by the backing store.
pub type DocumentKey = String;

#[derive(Error, Debug)]
pub enum StoreError
{
    /// A stored document does not decode into its typed record. Raised at
    /// read time rather than silently dropping fields.
    #[error("malformed document {key} in {collection}: {reason}")]
    Decode
    {
        collection: &'static str,
        key: DocumentKey,
        reason: String,
    },

    #[error("document {key} not found in {collection}")]
    NotFound
    {
        collection: &'static str, key: DocumentKey
    },

    /// Communication fault with the backing store. Never recovered locally;
    /// aborts the remainder of a generator run.
    #[error("store backend: {0}")]
    Backend(String),
}

/// Result of an insert keyed on a uniqueness constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertOutcome
{
    Created(DocumentKey),
    AlreadyExists,
}

/// The document-store capabilities the scheduling core depends on. Query
/// and write semantics belong to the backing store; this trait only names
/// the handful of shapes the core needs, so tests and alternative backends
/// can be substituted at the call site.
pub trait MaintenanceStore
{
    /// Every equipment document with its store-assigned key. The key backs
    /// the identifier when the record carries no explicit `equipment_id`.
    fn equipment(&self) -> Result<Vec<(DocumentKey, EquipmentRecord)>, StoreError>;

    /// All task mappings whose normalized equipment identifier matches.
    fn mappings_for_equipment(&self, equipment_id: &str) -> Result<Vec<EquipmentTaskMapping>, StoreError>;

    /// Point lookup of a task definition.
    fn task_definition(&self, task_id: &str) -> Result<Option<TaskDefinition>, StoreError>;

    /// Most recent approved completion log for the pair, by submission
    /// timestamp descending.
    fn latest_approved_log(&self, equipment_id: &str, task_id: &str) -> Result<Option<CompletionLog>, StoreError>;

    /// First technician matching the designation, optionally restricted to
    /// a department. Which candidate wins among ties is a property of the
    /// backing store's result order.
    fn find_technician(&self, department: Option<&str>, designation: &str) -> Result<Option<DocumentKey>, StoreError>;

    /// Insert an assignment unless one already exists for the same
    /// (equipment, task, due date) triple. Implementations must make the
    /// check-then-create atomic so concurrent runs cannot double-insert.
    fn create_assignment_if_absent(&mut self, assignment: Assignment) -> Result<InsertOutcome, StoreError>;

    fn assignment(&self, key: &str) -> Result<Option<Assignment>, StoreError>;

    fn set_assignment_status(&mut self, key: &str, status: AssignmentStatus) -> Result<(), StoreError>;

    /// Write a submitted log awaiting review.
    fn put_pending_log(&mut self, log: CompletionLog) -> Result<(), StoreError>;

    fn pending_log(&self, log_id: &str) -> Result<Option<CompletionLog>, StoreError>;

    /// Replace a pending log in place (rejection keeps it pending).
    fn update_pending_log(&mut self, log: CompletionLog) -> Result<(), StoreError>;

    fn remove_pending_log(&mut self, log_id: &str) -> Result<(), StoreError>;

    /// Write an approved log into the permanent collection.
    fn put_completion_log(&mut self, log: CompletionLog) -> Result<(), StoreError>;

    /// Existence probe on the (equipment, task, due date) triple.
    fn assignment_exists(&self, equipment_id: &str, task_id: &str, due_date: DueDate) -> Result<bool, StoreError>;
}
