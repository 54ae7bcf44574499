pub mod task;

pub use task::{parse_wire_date, Task, TaskDraft, TaskFilter, TaskPatch, DATE_FORMAT};
