//! 订单仓储
//!
//! 提供订单的持久化访问，订单号唯一性由数据库唯一约束保证

use async_trait::async_trait;
use loyalty_shared::error::{LoyaltyError, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::traits::OrderRepositoryTrait;
use crate::models::{Order, OrderStatus};

/// 订单仓储
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepositoryTrait for OrderRepository {
    async fn save(&self, user_id: Uuid, number: &str) -> Result<Order> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (user_id, number, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, number, status, accrual, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(number)
        .bind(OrderStatus::New)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => LoyaltyError::AlreadyExists {
                entity: "订单".to_string(),
                key: number.to_string(),
            },
            other => LoyaltyError::from(other),
        })?;

        Ok(order)
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, number, status, accrual, created_at, updated_at
            FROM orders
            WHERE number = $1
            "#,
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, number, status, accrual, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn update_by_number(
        &self,
        number: &str,
        status: OrderStatus,
        accrual: Option<f64>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE orders
            SET status = $1, accrual = $2, updated_at = NOW()
            WHERE number = $3
            "#,
        )
        .bind(status)
        .bind(accrual)
        .bind(number)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn sum_accruals_by_user(&self, user_id: Uuid) -> Result<f64> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(accrual), 0)
            FROM orders
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}
