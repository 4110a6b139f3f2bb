//! JSON mapping between domain records and the wire.

use afterschool_booking::Order;
use afterschool_catalog::Lesson;

/// Lesson projection served by `GET /lessons`.
pub fn lesson_to_json(lesson: &Lesson) -> serde_json::Value {
    serde_json::json!({
        "id": lesson.id.to_string(),
        "topic": lesson.topic,
        "teacher": lesson.teacher,
        "location": lesson.location,
        "price": lesson.price,
        "capacity": lesson.capacity,
        "icon": lesson.icon,
        "image": lesson.image,
    })
}

pub fn order_to_json(order: &Order) -> serde_json::Value {
    serde_json::json!({
        "id": order.id.to_string(),
        "lessonId": order.lesson_id.to_string(),
        "name": order.name,
        "phone": order.phone,
        "createdAt": order.created_at,
    })
}
