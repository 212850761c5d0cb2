//! 余额服务
//!
//! 余额不落库：每次读取时由订单积分总和与提现总额实时推导，
//! 正确性依赖读取时聚合而非任何缓存计数器。

use std::sync::Arc;

use loyalty_shared::error::Result;
use serde::Serialize;
use uuid::Uuid;

use crate::repository::{OrderRepositoryTrait, WithdrawalRepositoryTrait};

/// 推导出的余额
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Balance {
    /// 可用积分 = 累计积分 - 累计提现
    pub current: f64,
    /// 累计提现
    pub withdrawn: f64,
}

/// 余额服务
pub struct BalanceService {
    orders: Arc<dyn OrderRepositoryTrait>,
    withdrawals: Arc<dyn WithdrawalRepositoryTrait>,
}

impl BalanceService {
    pub fn new(
        orders: Arc<dyn OrderRepositoryTrait>,
        withdrawals: Arc<dyn WithdrawalRepositoryTrait>,
    ) -> Self {
        Self {
            orders,
            withdrawals,
        }
    }

    /// 当前余额
    ///
    /// 只有聚合查询本身失败时才报错，无数据合法地推导为 0。
    pub async fn current_balance(&self, user_id: Uuid) -> Result<Balance> {
        let accrued = self.orders.sum_accruals_by_user(user_id).await?;
        let withdrawn = self.withdrawals.sum_amounts_by_user(user_id).await?;

        Ok(Balance {
            current: accrued - withdrawn,
            withdrawn,
        })
    }
}
