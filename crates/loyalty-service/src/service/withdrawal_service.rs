//! 提现服务
//!
//! 提现针对外部商户订单号，只要求通过 Luhn 校验。
//! 服务层先做快速余额预检，权威校验由仓储在持锁事务内完成，
//! 两处都可能返回 `InsufficientFunds`。

use std::sync::Arc;

use loyalty_shared::error::{LoyaltyError, Result};
use tracing::info;
use uuid::Uuid;

use super::balance_service::BalanceService;
use crate::luhn;
use crate::models::Withdrawal;
use crate::repository::WithdrawalRepositoryTrait;

/// 提现服务
pub struct WithdrawalService {
    balance: Arc<BalanceService>,
    withdrawals: Arc<dyn WithdrawalRepositoryTrait>,
}

impl WithdrawalService {
    pub fn new(
        balance: Arc<BalanceService>,
        withdrawals: Arc<dyn WithdrawalRepositoryTrait>,
    ) -> Self {
        Self {
            balance,
            withdrawals,
        }
    }

    /// 从用户余额中提现积分
    pub async fn withdraw(&self, user_id: Uuid, order_number: &str, amount: f64) -> Result<()> {
        if !luhn::is_valid(order_number) {
            return Err(LoyaltyError::Validation(format!(
                "商户订单号未通过 Luhn 校验: {order_number}"
            )));
        }
        if amount <= 0.0 {
            return Err(LoyaltyError::Validation(
                "提现金额必须为正数".to_string(),
            ));
        }

        // 快速预检，避免余额明显不足时仍去竞争用户锁
        let balance = self.balance.current_balance(user_id).await?;
        if balance.current - amount < 0.0 {
            return Err(LoyaltyError::InsufficientFunds {
                required: amount,
                available: balance.current,
            });
        }

        let withdrawal = self
            .withdrawals
            .save_checked(user_id, order_number, amount)
            .await?;

        info!(
            %user_id,
            order_number = %withdrawal.order_number,
            amount,
            "提现成功"
        );
        Ok(())
    }

    /// 用户的全部提现记录；空列表由边界层映射为"无数据"响应
    pub async fn list_withdrawals(&self, user_id: Uuid) -> Result<Vec<Withdrawal>> {
        self.withdrawals.find_by_user(user_id).await
    }
}
