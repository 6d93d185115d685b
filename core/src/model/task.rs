use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do item. `text` and `created_at` never change after
/// creation; only `completed` is mutable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    // Serialized as an ISO-8601 string under the snapshot's camelCase key.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            completed: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_starts_active_with_fresh_id() {
        let a = Task::new("Buy milk".to_string());
        let b = Task::new("Buy milk".to_string());

        assert!(!a.completed);
        assert_eq!(a.text, "Buy milk");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serializes_created_at_under_camel_case_key() {
        let task = Task::new("Check keys".to_string());
        let json = serde_json::to_value(&task).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
        // chrono's serde form is an ISO-8601 string, not a number
        assert!(json["createdAt"].is_string());
    }
}
