//! Intake + store integration tests over the in-memory implementations.

use std::sync::Arc;

use afterschool_booking::{BookingRequest, OrderIntake, OrderStore};
use afterschool_catalog::{CatalogStore, Lesson};
use afterschool_core::{DomainError, LessonId};

use crate::seed;
use crate::store::in_memory::{InMemoryCatalogStore, InMemoryOrderStore};

fn lesson(topic: &str, capacity: i64) -> Lesson {
    Lesson {
        id: LessonId::new(),
        topic: topic.to_string(),
        teacher: "Mme. Dubois".to_string(),
        location: "Golders Green".to_string(),
        price: 92.0,
        capacity,
        icon: "⚛️".to_string(),
        image: "/images/phy.jpg".to_string(),
    }
}

fn booking(lesson_id: LessonId, name: &str, phone: &str) -> BookingRequest {
    BookingRequest {
        lesson_id: lesson_id.to_string(),
        name: name.to_string(),
        phone: phone.to_string(),
    }
}

async fn wired(lessons: Vec<Lesson>) -> (OrderIntake, Arc<InMemoryCatalogStore>, Arc<InMemoryOrderStore>) {
    let catalog = Arc::new(InMemoryCatalogStore::new());
    for l in lessons {
        catalog.insert(l).await.unwrap();
    }
    let orders = Arc::new(InMemoryOrderStore::new());
    let intake = OrderIntake::new(catalog.clone(), orders.clone());
    (intake, catalog, orders)
}

#[tokio::test]
async fn booking_decrements_capacity_and_records_one_order() {
    let l = lesson("Physics", 1);
    let id = l.id;
    let (intake, catalog, orders) = wired(vec![l]).await;

    let order = intake
        .place_order(&booking(id, "Ada Lovelace", "12345678"))
        .await
        .unwrap();

    assert_eq!(catalog.find_by_id(id).await.unwrap().unwrap().capacity, 0);
    let recorded = orders.list().await.unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].id, order.id);
    assert_eq!(recorded[0].lesson_id, id);
    assert_eq!(recorded[0].name, "Ada Lovelace");
    assert_eq!(recorded[0].phone, "12345678");

    // Same lesson again: the seat is gone.
    let err = intake
        .place_order(&booking(id, "Grace Hopper", "87654321"))
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::CapacityExhausted);
    assert_eq!(orders.list().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn racing_bookings_admit_exactly_the_available_seats() {
    const SEATS: i64 = 3;
    const CALLERS: usize = 10;

    let l = lesson("Robotics", SEATS);
    let id = l.id;
    let (intake, catalog, orders) = wired(vec![l]).await;

    let mut handles = Vec::with_capacity(CALLERS);
    for i in 0..CALLERS {
        let intake = intake.clone();
        let phone = format!("1000000{i:03}");
        handles.push(tokio::spawn(async move {
            intake.place_order(&booking(id, "Ada Lovelace", &phone)).await
        }));
    }

    let mut successes = 0;
    let mut exhausted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::CapacityExhausted) => exhausted += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(successes, SEATS as usize);
    assert_eq!(exhausted, CALLERS - SEATS as usize);
    assert_eq!(catalog.find_by_id(id).await.unwrap().unwrap().capacity, 0);
    assert_eq!(orders.list().await.unwrap().len(), SEATS as usize);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn two_callers_racing_for_the_last_seat() {
    let l = lesson("Chemistry", 1);
    let id = l.id;
    let (intake, _, orders) = wired(vec![l]).await;

    let a = {
        let intake = intake.clone();
        tokio::spawn(async move { intake.place_order(&booking(id, "Ada", "12345678")).await })
    };
    let b = {
        let intake = intake.clone();
        tokio::spawn(async move { intake.place_order(&booking(id, "Grace", "87654321")).await })
    };

    let results = [a.await.unwrap(), b.await.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    let exhausted = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::CapacityExhausted)))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(exhausted, 1);
    assert_eq!(orders.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn seeded_catalog_lists_all_topics_sorted() {
    let catalog = InMemoryCatalogStore::new();
    let count = seed::seed_demo_lessons(&catalog).await.unwrap();
    assert_eq!(count, 20);

    let lessons = catalog.list().await.unwrap();
    assert_eq!(lessons.len(), 20);
    let topics: Vec<&str> = lessons.iter().map(|l| l.topic.as_str()).collect();
    let mut sorted = topics.clone();
    sorted.sort();
    assert_eq!(topics, sorted);
    assert!(lessons.iter().all(|l| l.capacity == 5));
}
