use crate::model::task::Task;
use crate::repository::StoreError;

/// The device's key-value store, reduced to the two records this
/// application keeps: the task snapshot and the display preference.
///
/// Loads distinguish "nothing stored yet" (the default value) from
/// "stored but undecodable" (`StoreError::Corrupt`); callers decide how
/// much to care. Saves overwrite the previous value wholesale.
pub trait SnapshotStore {
    fn load_tasks(&self) -> Result<Vec<Task>, StoreError>;
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError>;
    fn load_dark_mode(&self) -> Result<bool, StoreError>;
    fn save_dark_mode(&self, on: bool) -> Result<(), StoreError>;
}
