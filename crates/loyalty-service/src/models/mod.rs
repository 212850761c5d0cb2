//! 数据模型
//!
//! 所有模型同时支持数据库（sqlx）和 JSON（serde）序列化

mod order;
mod user;
mod withdrawal;

pub use order::{Order, OrderStatus};
pub use user::User;
pub use withdrawal::Withdrawal;
