//! Storage contract for order records.

use async_trait::async_trait;

use afterschool_core::DomainResult;

use crate::order::Order;

/// Append-style access to order records. Orders are never updated or deleted.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert(&self, order: Order) -> DomainResult<()>;

    /// All recorded orders, in insertion order.
    async fn list(&self) -> DomainResult<Vec<Order>>;
}
