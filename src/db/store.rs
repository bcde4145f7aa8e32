//! Coffee data access

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::PgPool;
use tracing::debug;

use super::{
    mapping::{decode_row, INSERT_ONE, SELECT_ALL, SELECT_BY_ID},
    StoreError,
};
use crate::models::Coffee;

/// Storage operations the HTTP handlers depend on
#[async_trait]
pub trait CoffeeStore: Send + Sync {
    /// Every stored coffee, in no particular order
    async fn list_all(&self) -> Result<Vec<Coffee>, StoreError>;

    /// A single coffee by identifier, `None` when it does not exist
    async fn get_by_id(&self, id: &str) -> Result<Option<Coffee>, StoreError>;

    /// Store a new coffee and return it with its generated identifier
    async fn create(&self, coffee: Coffee) -> Result<Coffee, StoreError>;
}

/// Postgres-backed coffee store.
///
/// Every operation is bounded by `timeout`, measured from the moment it is called.
#[derive(Debug, Clone)]
pub struct PgCoffeeStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgCoffeeStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn fetch_all(&self) -> Result<Vec<Coffee>, StoreError> {
        let rows = sqlx::query(SELECT_ALL).fetch_all(&self.pool).await?;
        debug!("Fetched {} coffee rows", rows.len());
        rows.iter().map(|row| decode_row(row)).collect()
    }

    async fn fetch_one(&self, id: &str) -> Result<Option<Coffee>, StoreError> {
        let row = sqlx::query(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(|row| decode_row(row)).transpose()
    }

    async fn insert(&self, coffee: Coffee, now: DateTime<Utc>) -> Result<Coffee, StoreError> {
        let id: String = sqlx::query_scalar(INSERT_ONE)
            .bind(&coffee.name)
            .bind(&coffee.image)
            .bind(&coffee.region)
            .bind(&coffee.roast)
            .bind(coffee.price)
            .bind(coffee.grind_unit)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        debug!("Inserted coffee {}", id);
        Ok(Coffee {
            id,
            created_at: now,
            updated_at: now,
            ..coffee
        })
    }
}

#[async_trait]
impl CoffeeStore for PgCoffeeStore {
    async fn list_all(&self) -> Result<Vec<Coffee>, StoreError> {
        bounded(self.timeout, self.fetch_all()).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Coffee>, StoreError> {
        bounded(self.timeout, self.fetch_one(id)).await
    }

    async fn create(&self, coffee: Coffee) -> Result<Coffee, StoreError> {
        // Postgres keeps microseconds, so the echoed timestamps match what a read returns
        let now = Utc::now().trunc_subsecs(6);
        bounded(self.timeout, self.insert(coffee, now)).await
    }
}

/// Run a data-access future, failing with `StoreError::Timeout` once `timeout` elapses
pub async fn bounded<T, F>(timeout: Duration, operation: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(timeout, operation)
        .await
        .map_err(|_| StoreError::Timeout(timeout))?
}
