use serde::Deserialize;
use serde::Serialize;

/// A record in the `maintenance_tasks` collection.
///
/// Frequency comes in two shapes from the import pipeline: a normalized
/// `frequency_days` integer and the raw `frequency` string it was derived
/// from ("weekly", "monthly", a bare number, ...). A task with neither is
/// not schedule-driven and is never assigned by the generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition
{
    task_id: String,

    #[serde(default)]
    task_activity: Option<String>,

    #[serde(default)]
    task_title: Option<String>,

    #[serde(default)]
    frequency: Option<String>,

    #[serde(default)]
    frequency_days: Option<u32>,

    #[serde(default)]
    component_focus: Option<String>,

    #[serde(default)]
    description_check: Option<String>,
}

impl TaskDefinition
{
    pub fn new(task_id: impl Into<String>, title: impl Into<String>, frequency_days: Option<u32>) -> Self
    {
        Self {
            task_id: task_id.into(),
            task_activity: Some(title.into()),
            task_title: None,
            frequency: None,
            frequency_days,
            component_focus: None,
            description_check: None,
        }
    }

    pub fn task_id(&self) -> &str
    {
        &self.task_id
    }

    /// Denormalized onto each assignment at creation time. An empty
    /// activity falls through to the legacy title field.
    pub fn title(&self) -> &str
    {
        self.task_activity
            .as_deref()
            .filter(|title| !title.is_empty())
            .or(self.task_title.as_deref().filter(|title| !title.is_empty()))
            .unwrap_or_default()
    }

    /// Effective scheduling frequency in whole days. Falls back to parsing
    /// the raw `frequency` string when the normalized field is absent.
    /// Zero counts as absent.
    pub fn frequency_days(&self) -> Option<u32>
    {
        self.frequency_days
            .filter(|&days| days > 0)
            .or_else(|| self.frequency.as_deref().and_then(parse_frequency))
    }

    /// Checklist shown to the technician, derived by splitting the free-text
    /// activity, focus and check fields on newlines, `;` or `||`.
    pub fn checklist_items(&self) -> Vec<String>
    {
        let joined = [&self.task_activity, &self.component_focus, &self.description_check]
            .into_iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");

        joined
            .split(['\n', ';'])
            .flat_map(|part| part.split("||"))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Normalize a raw frequency label to whole days.
pub fn parse_frequency(raw: &str) -> Option<u32>
{
    let raw = raw.trim().to_lowercase();
    if raw.is_empty() {
        return None;
    }

    if let Ok(days) = raw.parse::<u32>() {
        return (days > 0).then_some(days);
    }

    if raw.contains("biweekly") {
        return Some(14);
    }
    if raw.contains("daily") || raw == "day" {
        return Some(1);
    }
    if raw.contains("weekly") {
        return Some(7);
    }
    if raw.contains("monthly") {
        return Some(30);
    }
    if raw.contains("quarter") {
        return Some(90);
    }
    if raw.contains("year") || raw.contains("annual") {
        return Some(365);
    }

    None
}
