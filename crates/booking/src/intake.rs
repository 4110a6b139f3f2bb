//! Order intake: the seat reservation transaction.

use std::sync::Arc;

use afterschool_catalog::CatalogStore;
use afterschool_core::{DomainError, DomainResult, LessonId};

use crate::order::Order;
use crate::store::OrderStore;
use crate::validation::BookingRequest;

/// Places orders against the catalog.
///
/// Store handles are injected; there is no process-wide database state.
#[derive(Clone)]
pub struct OrderIntake {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
}

impl OrderIntake {
    pub fn new(catalog: Arc<dyn CatalogStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self { catalog, orders }
    }

    /// Attempt to reserve one seat and record the order.
    ///
    /// The admission decision is the store's conditional decrement: the order
    /// is only written after the decrement applied, so a failed admission can
    /// never leave an order behind and capacity can never underflow, however
    /// many callers race for the last seat.
    pub async fn place_order(&self, request: &BookingRequest) -> DomainResult<Order> {
        request.validate()?;
        let lesson_id: LessonId = request.lesson_id.parse()?;

        let lesson = self
            .catalog
            .find_by_id(lesson_id)
            .await?
            .ok_or_else(DomainError::not_found)?;

        // Fast-path rejection only; the read is stale the moment it returns.
        if !lesson.has_spaces() {
            return Err(DomainError::capacity_exhausted());
        }

        if !self.catalog.decrement_capacity(lesson_id).await? {
            return Err(DomainError::capacity_exhausted());
        }

        let order = Order::new(lesson_id, request.name.clone(), request.phone.clone());
        if let Err(e) = self.orders.insert(order.clone()).await {
            // The seat was taken but the order record did not commit. The
            // failure is surfaced as-is and the lost seat logged for operator
            // reconciliation; no compensating increment is attempted.
            tracing::error!(
                lesson_id = %lesson_id,
                error = %e,
                "order insert failed after seat decrement"
            );
            return Err(e);
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use afterschool_catalog::{Lesson, LessonPatch, UpdateOutcome};

    use super::*;

    #[derive(Default)]
    struct MockCatalog {
        lessons: Mutex<Vec<Lesson>>,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl CatalogStore for MockCatalog {
        async fn insert(&self, lesson: Lesson) -> DomainResult<()> {
            self.lessons.lock().unwrap().push(lesson);
            Ok(())
        }

        async fn find_by_id(&self, id: LessonId) -> DomainResult<Option<Lesson>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .lessons
                .lock()
                .unwrap()
                .iter()
                .find(|l| l.id == id)
                .cloned())
        }

        async fn list(&self) -> DomainResult<Vec<Lesson>> {
            Ok(self.lessons.lock().unwrap().clone())
        }

        async fn update_fields(
            &self,
            _id: LessonId,
            _patch: &LessonPatch,
        ) -> DomainResult<UpdateOutcome> {
            unimplemented!("not exercised by intake")
        }

        async fn decrement_capacity(&self, id: LessonId) -> DomainResult<bool> {
            let mut lessons = self.lessons.lock().unwrap();
            match lessons.iter_mut().find(|l| l.id == id) {
                Some(lesson) if lesson.capacity > 0 => {
                    lesson.capacity -= 1;
                    Ok(true)
                }
                Some(_) => Ok(false),
                None => Ok(false),
            }
        }
    }

    #[derive(Default)]
    struct MockOrders {
        orders: Mutex<Vec<Order>>,
        fail_inserts: bool,
    }

    #[async_trait]
    impl OrderStore for MockOrders {
        async fn insert(&self, order: Order) -> DomainResult<()> {
            if self.fail_inserts {
                return Err(DomainError::storage("insert refused"));
            }
            self.orders.lock().unwrap().push(order);
            Ok(())
        }

        async fn list(&self) -> DomainResult<Vec<Order>> {
            Ok(self.orders.lock().unwrap().clone())
        }
    }

    fn lesson_with_capacity(capacity: i64) -> Lesson {
        Lesson {
            id: LessonId::new(),
            topic: "Physics".to_string(),
            teacher: "Mme. Dubois".to_string(),
            location: "Golders Green".to_string(),
            price: 92.0,
            capacity,
            icon: "⚛️".to_string(),
            image: "/images/phy.jpg".to_string(),
        }
    }

    fn booking(lesson_id: LessonId) -> BookingRequest {
        BookingRequest {
            lesson_id: lesson_id.to_string(),
            name: "Ada Lovelace".to_string(),
            phone: "12345678".to_string(),
        }
    }

    async fn intake_with(
        lesson: Option<Lesson>,
        orders: MockOrders,
    ) -> (OrderIntake, Arc<MockCatalog>, Arc<MockOrders>) {
        let catalog = Arc::new(MockCatalog::default());
        if let Some(lesson) = lesson {
            catalog.insert(lesson).await.unwrap();
        }
        let orders = Arc::new(orders);
        let intake = OrderIntake::new(catalog.clone(), orders.clone());
        (intake, catalog, orders)
    }

    #[tokio::test]
    async fn successful_booking_decrements_and_records_once() {
        let lesson = lesson_with_capacity(5);
        let id = lesson.id;
        let (intake, catalog, orders) = intake_with(Some(lesson), MockOrders::default()).await;

        let order = intake.place_order(&booking(id)).await.unwrap();

        assert_eq!(order.lesson_id, id);
        assert_eq!(order.name, "Ada Lovelace");
        assert_eq!(order.phone, "12345678");

        let stored = catalog.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.capacity, 4);

        let recorded = orders.list().await.unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].id, order.id);
    }

    #[tokio::test]
    async fn exhausted_lesson_rejects_and_records_nothing() {
        let lesson = lesson_with_capacity(0);
        let id = lesson.id;
        let (intake, catalog, orders) = intake_with(Some(lesson), MockOrders::default()).await;

        let err = intake.place_order(&booking(id)).await.unwrap_err();

        assert_eq!(err, DomainError::CapacityExhausted);
        assert!(orders.list().await.unwrap().is_empty());
        assert_eq!(catalog.find_by_id(id).await.unwrap().unwrap().capacity, 0);
    }

    #[tokio::test]
    async fn unknown_lesson_is_not_found() {
        let (intake, _, orders) = intake_with(None, MockOrders::default()).await;

        let err = intake.place_order(&booking(LessonId::new())).await.unwrap_err();

        assert_eq!(err, DomainError::NotFound);
        assert!(orders.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_payload_never_touches_the_catalog() {
        let lesson = lesson_with_capacity(5);
        let id = lesson.id;
        let (intake, catalog, _) = intake_with(Some(lesson), MockOrders::default()).await;

        let mut req = booking(id);
        req.name = "Ada 1985".to_string();
        let err = intake.place_order(&req).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_lesson_id_never_touches_the_catalog() {
        let (intake, catalog, _) = intake_with(None, MockOrders::default()).await;

        let mut req = booking(LessonId::new());
        req.lesson_id = "not-a-uuid".to_string();
        let err = intake.place_order(&req).await.unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(catalog.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_order_insert_surfaces_storage_failure() {
        let lesson = lesson_with_capacity(5);
        let id = lesson.id;
        let orders = MockOrders {
            fail_inserts: true,
            ..Default::default()
        };
        let (intake, _, orders) = intake_with(Some(lesson), orders).await;

        let err = intake.place_order(&booking(id)).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage(_)));
        assert!(orders.list().await.unwrap().is_empty());
    }
}
