use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use afterschool_core::{LessonId, OrderId};

/// A customer's reservation of one seat on a lesson.
///
/// Created exactly once per successful booking and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub lesson_id: LessonId,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build a new order with a fresh id and the current timestamp.
    pub fn new(lesson_id: LessonId, name: String, phone: String) -> Self {
        Self {
            id: OrderId::new(),
            lesson_id,
            name,
            phone,
            created_at: Utc::now(),
        }
    }
}
