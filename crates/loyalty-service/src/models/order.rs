//! 订单模型
//!
//! 订单以订单号（Luhn 可校验的十进制数字串）为业务主键，
//! 全局唯一，一个订单号至多对应一条记录。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 订单状态
///
/// PROCESSED 和 INVALID 为终态：accrual 不再变更，对账任务停止。
/// ABANDONED 表示对账预算耗尽后的放弃标记，区别于 NEW/PROCESSING，
/// 便于监控发现卡住的订单；对外展示时折叠为 PROCESSING。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "varchar", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 刚提交，尚未开始对账
    #[default]
    New,
    /// 上游核算服务正在计算
    Processing,
    /// 上游判定订单无效，不产生积分
    Invalid,
    /// 核算完成，积分已入账
    Processed,
    /// 对账尝试次数耗尽，放弃轮询
    Abandoned,
}

impl OrderStatus {
    /// 是否为终态（之后 accrual 不可变，对账任务不再运行）
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Processed | Self::Invalid)
    }

    /// 对外展示的状态
    ///
    /// API 契约只有 NEW/PROCESSING/INVALID/PROCESSED 四种，
    /// 内部的 ABANDONED 标记对客户端折叠为 PROCESSING。
    pub fn public(self) -> Self {
        match self {
            Self::Abandoned => Self::Processing,
            other => other,
        }
    }
}

/// 订单
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub user_id: Uuid,
    pub number: String,
    pub status: OrderStatus,
    /// 核算完成前为空
    pub accrual: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
