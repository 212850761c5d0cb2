//! 提现模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 积分提现记录
///
/// order_number 是外部商户侧的订单号，与本系统的订单不共享命名空间，
/// 只要求通过 Luhn 校验。记录一经创建不可变。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Withdrawal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_number: String,
    /// 提现金额，恒为正
    pub amount: f64,
    pub processed_at: DateTime<Utc>,
}
