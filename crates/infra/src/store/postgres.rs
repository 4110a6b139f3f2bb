//! Postgres-backed catalog and order stores.
//!
//! ## Admission atomicity
//!
//! The seat decrement is a single guarded UPDATE:
//!
//! ```sql
//! UPDATE lessons SET capacity = capacity - 1 WHERE id = $1 AND capacity > 0
//! ```
//!
//! The reported row count is the admission decision. Concurrent callers
//! racing for a last seat serialize on the row lock, so exactly one UPDATE
//! matches and capacity can never go negative. No application-level locking
//! is needed on top of the pooled connection.
//!
//! ## Expected schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS lessons (
//!     id       UUID PRIMARY KEY,
//!     topic    TEXT NOT NULL,
//!     teacher  TEXT NOT NULL,
//!     location TEXT NOT NULL,
//!     price    DOUBLE PRECISION NOT NULL CHECK (price >= 0),
//!     capacity BIGINT NOT NULL CHECK (capacity >= 0),
//!     icon     TEXT NOT NULL,
//!     image    TEXT NOT NULL
//! );
//!
//! CREATE TABLE IF NOT EXISTS orders (
//!     id         UUID PRIMARY KEY,
//!     lesson_id  UUID NOT NULL,
//!     name       TEXT NOT NULL,
//!     phone      TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! `ensure_schema` applies exactly this DDL; there is no migration tooling.
//!
//! ## Error mapping
//!
//! Every SQLx failure becomes `DomainError::Storage` with the operation name
//! and the driver message; the HTTP layer turns that into a generic 500 and
//! keeps the detail in the operator log. Calls that exceed
//! [`STORAGE_TIMEOUT`] are reported the same way.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use afterschool_booking::{Order, OrderStore};
use afterschool_catalog::{CatalogStore, Lesson, LessonPatch, UpdateOutcome};
use afterschool_core::{DomainError, DomainResult, LessonId, OrderId};

/// Upper bound on any single storage call. No operation blocks indefinitely.
pub const STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Create the lessons/orders tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> DomainResult<()> {
    let ddl = r#"
        CREATE TABLE IF NOT EXISTS lessons (
            id       UUID PRIMARY KEY,
            topic    TEXT NOT NULL,
            teacher  TEXT NOT NULL,
            location TEXT NOT NULL,
            price    DOUBLE PRECISION NOT NULL CHECK (price >= 0),
            capacity BIGINT NOT NULL CHECK (capacity >= 0),
            icon     TEXT NOT NULL,
            image    TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS orders (
            id         UUID PRIMARY KEY,
            lesson_id  UUID NOT NULL,
            name       TEXT NOT NULL,
            phone      TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL
        );
    "#;
    with_timeout("ensure_schema", sqlx::raw_sql(ddl).execute(pool)).await?;
    Ok(())
}

/// Postgres-backed lesson catalog.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    #[instrument(skip(self, lesson), fields(lesson_id = %lesson.id), err)]
    async fn insert(&self, lesson: Lesson) -> DomainResult<()> {
        with_timeout(
            "insert_lesson",
            sqlx::query(
                r#"
                INSERT INTO lessons (id, topic, teacher, location, price, capacity, icon, image)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(lesson.id.as_uuid())
            .bind(&lesson.topic)
            .bind(&lesson.teacher)
            .bind(&lesson.location)
            .bind(lesson.price)
            .bind(lesson.capacity)
            .bind(&lesson.icon)
            .bind(&lesson.image)
            .execute(&*self.pool),
        )
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: LessonId) -> DomainResult<Option<Lesson>> {
        let row = with_timeout(
            "find_lesson",
            sqlx::query(
                r#"
                SELECT id, topic, teacher, location, price, capacity, icon, image
                FROM lessons
                WHERE id = $1
                "#,
            )
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool),
        )
        .await?;

        row.map(|r| lesson_from_row(&r)).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Lesson>> {
        let rows = with_timeout(
            "list_lessons",
            sqlx::query(
                r#"
                SELECT id, topic, teacher, location, price, capacity, icon, image
                FROM lessons
                ORDER BY topic ASC
                "#,
            )
            .fetch_all(&*self.pool),
        )
        .await?;

        rows.iter().map(lesson_from_row).collect()
    }

    #[instrument(skip(self, patch), fields(lesson_id = %id), err)]
    async fn update_fields(&self, id: LessonId, patch: &LessonPatch) -> DomainResult<UpdateOutcome> {
        // COALESCE keeps unpatched columns; `matched` is the row count. An
        // applied UPDATE counts the row even when values are unchanged, so
        // `modified` mirrors `matched` here.
        let result = with_timeout(
            "update_lesson",
            sqlx::query(
                r#"
                UPDATE lessons SET
                    topic    = COALESCE($2, topic),
                    teacher  = COALESCE($3, teacher),
                    location = COALESCE($4, location),
                    price    = COALESCE($5, price),
                    capacity = COALESCE($6, capacity),
                    icon     = COALESCE($7, icon),
                    image    = COALESCE($8, image)
                WHERE id = $1
                "#,
            )
            .bind(id.as_uuid())
            .bind(patch.topic.as_deref())
            .bind(patch.teacher.as_deref())
            .bind(patch.location.as_deref())
            .bind(patch.price)
            .bind(patch.capacity)
            .bind(patch.icon.as_deref())
            .bind(patch.image.as_deref())
            .execute(&*self.pool),
        )
        .await?;

        let matched = result.rows_affected() > 0;
        Ok(UpdateOutcome {
            matched,
            modified: matched,
        })
    }

    #[instrument(skip(self), fields(lesson_id = %id), err)]
    async fn decrement_capacity(&self, id: LessonId) -> DomainResult<bool> {
        let result = with_timeout(
            "decrement_capacity",
            sqlx::query(
                r#"
                UPDATE lessons
                SET capacity = capacity - 1
                WHERE id = $1 AND capacity > 0
                "#,
            )
            .bind(id.as_uuid())
            .execute(&*self.pool),
        )
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

/// Postgres-backed order records.
#[derive(Debug, Clone)]
pub struct PostgresOrderStore {
    pool: Arc<PgPool>,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[instrument(skip(self, order), fields(order_id = %order.id), err)]
    async fn insert(&self, order: Order) -> DomainResult<()> {
        with_timeout(
            "insert_order",
            sqlx::query(
                r#"
                INSERT INTO orders (id, lesson_id, name, phone, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order.id.as_uuid())
            .bind(order.lesson_id.as_uuid())
            .bind(&order.name)
            .bind(&order.phone)
            .bind(order.created_at)
            .execute(&*self.pool),
        )
        .await?;
        Ok(())
    }

    async fn list(&self) -> DomainResult<Vec<Order>> {
        let rows = with_timeout(
            "list_orders",
            sqlx::query(
                r#"
                SELECT id, lesson_id, name, phone, created_at
                FROM orders
                ORDER BY created_at ASC
                "#,
            )
            .fetch_all(&*self.pool),
        )
        .await?;

        rows.iter().map(order_from_row).collect()
    }
}

fn lesson_from_row(row: &PgRow) -> DomainResult<Lesson> {
    Ok(Lesson {
        id: LessonId::from_uuid(get(row, "id")?),
        topic: get(row, "topic")?,
        teacher: get(row, "teacher")?,
        location: get(row, "location")?,
        price: get(row, "price")?,
        capacity: get(row, "capacity")?,
        icon: get(row, "icon")?,
        image: get(row, "image")?,
    })
}

fn order_from_row(row: &PgRow) -> DomainResult<Order> {
    let created_at: DateTime<Utc> = get(row, "created_at")?;
    Ok(Order {
        id: OrderId::from_uuid(get(row, "id")?),
        lesson_id: LessonId::from_uuid(get(row, "lesson_id")?),
        name: get(row, "name")?,
        phone: get(row, "phone")?,
        created_at,
    })
}

fn get<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
    row: &'r PgRow,
    column: &str,
) -> DomainResult<T> {
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("failed to decode column {column}: {e}")))
}

/// Run a storage future under [`STORAGE_TIMEOUT`], mapping driver errors and
/// elapsed timers into the storage error variant.
async fn with_timeout<T, F>(operation: &str, fut: F) -> DomainResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(STORAGE_TIMEOUT, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(map_sqlx_error(operation, e)),
        Err(_) => Err(DomainError::storage(format!("{operation}: timed out"))),
    }
}

/// Map SQLx errors to the domain storage error.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Database(db_err) => {
            DomainError::storage(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::PoolClosed => {
            DomainError::storage(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            DomainError::storage(format!("connection pool timed out in {operation}"))
        }
        _ => DomainError::storage(format!("sqlx error in {operation}: {err}")),
    }
}
