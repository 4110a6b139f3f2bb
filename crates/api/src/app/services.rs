use std::sync::Arc;

use sqlx::PgPool;

use afterschool_booking::{OrderIntake, OrderStore};
use afterschool_catalog::CatalogStore;
use afterschool_core::DomainResult;
use afterschool_infra::{
    InMemoryCatalogStore, InMemoryOrderStore, PostgresCatalogStore, PostgresOrderStore,
    ensure_schema,
};

/// The wired application: store handles plus the intake built over them.
///
/// Constructed once at startup and injected into handlers; nothing in the
/// process holds storage state globally.
pub struct AppServices {
    catalog: Arc<dyn CatalogStore>,
    orders: Arc<dyn OrderStore>,
    intake: OrderIntake,
}

impl AppServices {
    pub fn new(catalog: Arc<dyn CatalogStore>, orders: Arc<dyn OrderStore>) -> Self {
        let intake = OrderIntake::new(catalog.clone(), orders.clone());
        Self {
            catalog,
            orders,
            intake,
        }
    }

    /// In-memory wiring (dev/test). Starts with an empty catalog.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(InMemoryOrderStore::new()),
        )
    }

    /// Postgres wiring. Applies the schema before handing out stores.
    pub async fn postgres(pool: PgPool) -> DomainResult<Self> {
        ensure_schema(&pool).await?;
        Ok(Self::new(
            Arc::new(PostgresCatalogStore::new(pool.clone())),
            Arc::new(PostgresOrderStore::new(pool)),
        ))
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogStore> {
        &self.catalog
    }

    pub fn orders(&self) -> &Arc<dyn OrderStore> {
        &self.orders
    }

    pub fn intake(&self) -> &OrderIntake {
        &self.intake
    }
}
