use serde::{Deserialize, Serialize};

use afterschool_core::{DomainError, DomainResult, LessonId};

/// A bookable catalog item with a finite seat capacity.
///
/// Created by seeding, mutated by catalog updates and by order placement
/// (capacity decrement), never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub topic: String,
    pub teacher: String,
    pub location: String,
    pub price: f64,
    /// Seats remaining. Never negative; the conditional decrement in the
    /// store is the only path that lowers it.
    pub capacity: i64,
    pub icon: String,
    pub image: String,
}

impl Lesson {
    pub fn has_spaces(&self) -> bool {
        self.capacity > 0
    }
}

/// Partial update for a lesson.
///
/// Any subset of attributes may be supplied; unknown keys are rejected at
/// deserialization so a client typo cannot silently no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LessonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LessonPatch {
    pub fn is_empty(&self) -> bool {
        self.topic.is_none()
            && self.teacher.is_none()
            && self.location.is_none()
            && self.price.is_none()
            && self.capacity.is_none()
            && self.icon.is_none()
            && self.image.is_none()
    }

    /// Shape checks that run before the store is consulted.
    pub fn validate(&self) -> DomainResult<()> {
        if self.is_empty() {
            return Err(DomainError::validation("no fields provided to update"));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::validation("price must be a non-negative number"));
            }
        }
        if let Some(capacity) = self.capacity {
            if capacity < 0 {
                return Err(DomainError::validation("capacity cannot be negative"));
            }
        }
        Ok(())
    }

    /// Apply the patch in place. Returns whether any field actually changed.
    pub fn apply_to(&self, lesson: &mut Lesson) -> bool {
        let before = lesson.clone();
        if let Some(topic) = &self.topic {
            lesson.topic = topic.clone();
        }
        if let Some(teacher) = &self.teacher {
            lesson.teacher = teacher.clone();
        }
        if let Some(location) = &self.location {
            lesson.location = location.clone();
        }
        if let Some(price) = self.price {
            lesson.price = price;
        }
        if let Some(capacity) = self.capacity {
            lesson.capacity = capacity;
        }
        if let Some(icon) = &self.icon {
            lesson.icon = icon.clone();
        }
        if let Some(image) = &self.image {
            lesson.image = image.clone();
        }
        *lesson != before
    }
}
