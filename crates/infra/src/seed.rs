//! Demo lesson fixtures.
//!
//! The catalog has no create endpoint, so fresh deployments and tests start
//! from this set.

use afterschool_catalog::{CatalogStore, Lesson};
use afterschool_core::{DomainResult, LessonId};

/// The demo catalog: twenty lessons, five seats each.
///
/// Ids are freshly generated on every call.
pub fn demo_lessons() -> Vec<Lesson> {
    DEMO_ROWS
        .iter()
        .map(|(topic, teacher, location, price, icon, image)| Lesson {
            id: LessonId::new(),
            topic: (*topic).to_string(),
            teacher: (*teacher).to_string(),
            location: (*location).to_string(),
            price: *price,
            capacity: 5,
            icon: (*icon).to_string(),
            image: (*image).to_string(),
        })
        .collect()
}

/// Insert the demo catalog into `store`. Returns how many lessons went in.
pub async fn seed_demo_lessons(store: &dyn CatalogStore) -> DomainResult<usize> {
    let lessons = demo_lessons();
    let count = lessons.len();
    for lesson in lessons {
        store.insert(lesson).await?;
    }
    tracing::info!(count, "seeded demo lessons");
    Ok(count)
}

type DemoRow = (&'static str, &'static str, &'static str, f64, &'static str, &'static str);

const DEMO_ROWS: &[DemoRow] = &[
    ("Mathematics", "Mr. Patel", "Hendon", 100.0, "📐", "/images/maths.jpg"),
    ("Cybersecurity", "Dr. Lee", "Colindale", 95.0, "🔬", "/images/cyber.jpg"),
    ("English", "Ms. Brown", "Brent Cross", 90.0, "📚", "/images/eng.jpg"),
    ("LLB", "Mr. Carter", "Golders Green", 85.0, "🏛️", "/images/law.jpg"),
    ("Geography", "Ms. Parker", "Hendon", 88.0, "🗺️", "/images/geography.jpg"),
    ("Artificial Intelligence", "Mr. Singh", "Colindale", 120.0, "💻", "/images/ai.jpg"),
    ("Art", "Ms. Torres", "Brent Cross", 75.0, "🎨", "/images/art.jpg"),
    ("Music", "Mr. Johnson", "Golders Green", 80.0, "🎼", "/images/music.jpg"),
    ("Drama", "Ms. Kelly", "Hendon", 70.0, "🎭", "/images/drama.jpg"),
    ("Sports", "Coach Adams", "Colindale", 65.0, "🏅", "/images/sports.jpg"),
    ("Physics", "Mme. Dubois", "Golders Green", 92.0, "⚛️", "/images/phy.jpg"),
    ("Spanish", "Mr. Rivera", "Brent Cross", 92.0, "🇪🇸", "/images/spanish.jpg"),
    ("Biology", "Dr. Evans", "Colindale", 97.0, "🧬", "/images/bio.jpg"),
    ("Chemistry", "Dr. Ahmed", "Hendon", 98.0, "⚗️", "/images/chem.jpg"),
    ("Culinary", "Mr. Clark", "Hendon", 110.0, "👨‍🍳", "/images/culinary.jpg"),
    ("Economics", "Dr. Moore", "Golders Green", 105.0, "💰", "/images/eco.jpg"),
    ("Psychology", "Ms. Taylor", "Brent Cross", 99.0, "🧠", "/images/psychology.jpg"),
    ("Philosophy", "Dr. White", "Colindale", 90.0, "🤔", "/images/philosophy.jpg"),
    ("Computer Science", "Mr. Zhao", "Hendon", 125.0, "🖥️", "/images/cs.jpg"),
    ("Robotics", "Dr. Kim", "Colindale", 130.0, "🤖", "/images/robotics.jpg"),
];
