//! 提现仓储
//!
//! 提现的余额校验和插入在同一事务内完成，事务持有用户级咨询锁，
//! 同一用户的并发提现在此串行化，余额不会被并发扣成负数。

use async_trait::async_trait;
use loyalty_shared::error::{LoyaltyError, Result};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::traits::WithdrawalRepositoryTrait;
use crate::models::Withdrawal;

/// 提现仓储
pub struct WithdrawalRepository {
    pool: PgPool,
}

impl WithdrawalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WithdrawalRepositoryTrait for WithdrawalRepository {
    async fn save_checked(
        &self,
        user_id: Uuid,
        order_number: &str,
        amount: f64,
    ) -> Result<Withdrawal> {
        let mut tx = self.pool.begin().await?;

        // 事务级咨询锁：同一用户的余额检查与写入互斥，事务结束自动释放
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let accrued: f64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(accrual), 0) FROM orders WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        let withdrawn: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0) FROM withdrawals WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let available = accrued - withdrawn;
        if available - amount < 0.0 {
            debug!(%user_id, amount, available, "提现被拒绝，余额不足");
            // 事务随返回值丢弃并回滚
            return Err(LoyaltyError::InsufficientFunds {
                required: amount,
                available,
            });
        }

        let withdrawal = sqlx::query_as::<_, Withdrawal>(
            r#"
            INSERT INTO withdrawals (user_id, order_number, amount)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, order_number, amount, processed_at
            "#,
        )
        .bind(user_id)
        .bind(order_number)
        .bind(amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(withdrawal)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Withdrawal>> {
        let withdrawals = sqlx::query_as::<_, Withdrawal>(
            r#"
            SELECT id, user_id, order_number, amount, processed_at
            FROM withdrawals
            WHERE user_id = $1
            ORDER BY processed_at
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(withdrawals)
    }

    async fn sum_amounts_by_user(&self, user_id: Uuid) -> Result<f64> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM withdrawals
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}
