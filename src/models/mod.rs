pub mod task;

pub use task::{Task, TaskInput, TaskQuery, TaskUpdate};
