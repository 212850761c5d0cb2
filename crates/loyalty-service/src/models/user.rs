//! 用户模型
//!
//! 认证模块拥有用户数据；订单/余额/提现只使用其 id 作为外键。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    /// bcrypt 哈希，不序列化到任何响应
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
