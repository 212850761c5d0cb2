//! 响应 DTO
//!
//! JSON 字段名与原有 API 契约保持一致：订单视图为
//! number/status/accrual/uploaded_at，提现视图为 order/sum/processed_at。

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Order, OrderStatus, Withdrawal};
use crate::service::Balance;

/// 注册/登录响应
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

/// 订单视图
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub number: String,
    /// 对外折叠后的状态（ABANDONED 显示为 PROCESSING）
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accrual: Option<f64>,
    pub uploaded_at: DateTime<Utc>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number.clone(),
            status: order.status.public(),
            accrual: order.accrual,
            uploaded_at: order.created_at,
        }
    }
}

/// 余额视图
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub current: f64,
    pub withdrawn: f64,
}

impl From<Balance> for BalanceResponse {
    fn from(balance: Balance) -> Self {
        Self {
            current: balance.current,
            withdrawn: balance.withdrawn,
        }
    }
}

/// 提现视图
#[derive(Debug, Serialize)]
pub struct WithdrawalResponse {
    pub order: String,
    pub sum: f64,
    pub processed_at: DateTime<Utc>,
}

impl From<&Withdrawal> for WithdrawalResponse {
    fn from(withdrawal: &Withdrawal) -> Self {
        Self {
            order: withdrawal.order_number.clone(),
            sum: withdrawal.amount,
            processed_at: withdrawal.processed_at,
        }
    }
}
