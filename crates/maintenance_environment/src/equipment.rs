use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// A record in the `equipment_master` collection.
///
/// The upstream CSV import writes `""` for cells that were blank, so the
/// accessors treat the empty string as absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord
{
    #[serde(default)]
    equipment_id: Option<String>,

    #[serde(default)]
    equipment_name: Option<String>,

    #[serde(default)]
    department: Option<String>,

    /// Commissioning date. Seeds the periodic schedule for a task that has
    /// no approved completion history.
    #[serde(default, rename = "startDate")]
    start_date: Option<NaiveDate>,
}

impl EquipmentRecord
{
    pub fn new(equipment_id: Option<String>, department: Option<String>, start_date: Option<NaiveDate>) -> Self
    {
        Self {
            equipment_id,
            equipment_name: None,
            department,
            start_date,
        }
    }

    pub fn equipment_id(&self) -> Option<&str>
    {
        self.equipment_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn equipment_name(&self) -> Option<&str>
    {
        self.equipment_name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn department(&self) -> Option<&str>
    {
        self.department.as_deref().filter(|department| !department.is_empty())
    }

    pub fn start_date(&self) -> Option<NaiveDate>
    {
        self.start_date
    }
}

/// A record in the `equipment_task_map` collection. One equipment item maps
/// to many tasks; the many-to-many relation is one record per pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquipmentTaskMapping
{
    /// Normalized equipment identifier, the filter key for the mapping
    /// lookup.
    equipment_id_norm: String,

    #[serde(default)]
    task_id: Option<String>,
}

impl EquipmentTaskMapping
{
    pub fn new(equipment_id_norm: impl Into<String>, task_id: impl Into<String>) -> Self
    {
        Self {
            equipment_id_norm: normalize_equipment_id(&equipment_id_norm.into()),
            task_id: Some(task_id.into()),
        }
    }

    pub fn equipment_id_norm(&self) -> &str
    {
        &self.equipment_id_norm
    }

    /// A mapping written without a task identifier is unusable and gets
    /// skipped by the generator.
    pub fn task_id(&self) -> Option<&str>
    {
        self.task_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Normalization applied to equipment identifiers before they are used as
/// lookup keys. The import pipeline stores mapping keys already normalized.
pub fn normalize_equipment_id(raw: &str) -> String
{
    raw.trim().to_string()
}
