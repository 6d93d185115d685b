pub mod model;
pub mod repository;
pub mod service;

pub use model::filter::Filter;
pub use model::task::Task;
pub use repository::{FileStore, SnapshotStore, StoreError};
pub use service::engine::{Notice, TaskEngine, ValidationError};
