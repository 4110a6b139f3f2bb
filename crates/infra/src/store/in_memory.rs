use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use afterschool_booking::{Order, OrderStore};
use afterschool_catalog::{CatalogStore, Lesson, LessonPatch, UpdateOutcome};
use afterschool_core::{DomainError, DomainResult, LessonId};

/// In-memory lesson catalog.
///
/// Intended for tests/dev. The conditional decrement performs its check and
/// mutation under a single write lock, which gives the same admission
/// atomicity the persistent store gets from its guarded UPDATE.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    lessons: RwLock<HashMap<LessonId, Lesson>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert(&self, lesson: Lesson) -> DomainResult<()> {
        let mut lessons = self
            .lessons
            .write()
            .map_err(|_| DomainError::storage("lesson store lock poisoned"))?;
        lessons.insert(lesson.id, lesson);
        Ok(())
    }

    async fn find_by_id(&self, id: LessonId) -> DomainResult<Option<Lesson>> {
        let lessons = self
            .lessons
            .read()
            .map_err(|_| DomainError::storage("lesson store lock poisoned"))?;
        Ok(lessons.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Lesson>> {
        let lessons = self
            .lessons
            .read()
            .map_err(|_| DomainError::storage("lesson store lock poisoned"))?;
        let mut all: Vec<Lesson> = lessons.values().cloned().collect();
        all.sort_by(|a, b| a.topic.cmp(&b.topic));
        Ok(all)
    }

    async fn update_fields(&self, id: LessonId, patch: &LessonPatch) -> DomainResult<UpdateOutcome> {
        let mut lessons = self
            .lessons
            .write()
            .map_err(|_| DomainError::storage("lesson store lock poisoned"))?;
        match lessons.get_mut(&id) {
            Some(lesson) => {
                let modified = patch.apply_to(lesson);
                Ok(UpdateOutcome {
                    matched: true,
                    modified,
                })
            }
            None => Ok(UpdateOutcome {
                matched: false,
                modified: false,
            }),
        }
    }

    async fn decrement_capacity(&self, id: LessonId) -> DomainResult<bool> {
        let mut lessons = self
            .lessons
            .write()
            .map_err(|_| DomainError::storage("lesson store lock poisoned"))?;
        match lessons.get_mut(&id) {
            Some(lesson) if lesson.capacity > 0 => {
                lesson.capacity -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// In-memory order records, insertion-ordered.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> DomainResult<()> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| DomainError::storage("order store lock poisoned"))?;
        orders.push(order);
        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|_| DomainError::storage("order store lock poisoned"))?;
        Ok(orders.clone())
    }
}
