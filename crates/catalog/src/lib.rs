//! Lesson catalog domain: the `Lesson` record, partial updates, and the
//! storage contract the rest of the system consumes.

pub mod lesson;
pub mod store;

pub use lesson::{Lesson, LessonPatch};
pub use store::{CatalogStore, UpdateOutcome};
