//! Storage contract for the lesson catalog.
//!
//! The domain depends only on this trait; which technology backs it is an
//! infrastructure decision. Implementations live in `afterschool-infra`.

use async_trait::async_trait;

use afterschool_core::{DomainResult, LessonId};

use crate::lesson::{Lesson, LessonPatch};

/// Outcome of a partial update.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// A lesson with the given id exists.
    pub matched: bool,
    /// At least one stored value changed.
    pub modified: bool,
}

/// Read/update access to lesson records.
///
/// All methods must be safe for concurrent use. The one hard requirement is
/// `decrement_capacity`: check and decrement must be a single atomic step per
/// lesson, because its applied/not-applied result is the authoritative
/// admission decision for a booking.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Add a lesson to the catalog (seeding and tests; lessons are never
    /// created through the public API).
    async fn insert(&self, lesson: Lesson) -> DomainResult<()>;

    async fn find_by_id(&self, id: LessonId) -> DomainResult<Option<Lesson>>;

    /// All lessons, sorted by topic ascending.
    async fn list(&self) -> DomainResult<Vec<Lesson>>;

    /// Apply a partial update. `matched == false` means no such lesson.
    async fn update_fields(&self, id: LessonId, patch: &LessonPatch) -> DomainResult<UpdateOutcome>;

    /// Decrement capacity by one, only if `capacity > 0`.
    ///
    /// Returns whether the decrement applied. Two concurrent calls racing for
    /// a last seat must see exactly one `true`.
    async fn decrement_capacity(&self, id: LessonId) -> DomainResult<bool>;
}
