//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层和对账任务依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;
use loyalty_shared::error::Result;
use uuid::Uuid;

use crate::models::{Order, OrderStatus, User, Withdrawal};

/// 订单仓储接口
///
/// 订单号唯一性由存储层约束保证；update_by_number 为无条件覆盖，
/// 对同一终态+积分重复应用没有额外效果（幂等）。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepositoryTrait: Send + Sync {
    /// 以 NEW 状态插入新订单，订单号冲突时返回 `AlreadyExists`
    async fn save(&self, user_id: Uuid, number: &str) -> Result<Order>;

    /// 按订单号查找
    async fn find_by_number(&self, number: &str) -> Result<Option<Order>>;

    /// 按用户查找全部订单，按创建时间升序
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>>;

    /// 覆盖写入状态与积分
    async fn update_by_number(
        &self,
        number: &str,
        status: OrderStatus,
        accrual: Option<f64>,
    ) -> Result<()>;

    /// 用户全部订单的积分总和，无订单时为 0
    async fn sum_accruals_by_user(&self, user_id: Uuid) -> Result<f64>;
}

/// 提现仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WithdrawalRepositoryTrait: Send + Sync {
    /// 在同一事务内持用户级锁重查余额并插入提现记录
    ///
    /// 余额不足时返回 `InsufficientFunds` 且不产生任何写入。
    async fn save_checked(
        &self,
        user_id: Uuid,
        order_number: &str,
        amount: f64,
    ) -> Result<Withdrawal>;

    /// 按用户查找全部提现记录，按创建时间升序
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Withdrawal>>;

    /// 用户提现总额，无记录时为 0
    async fn sum_amounts_by_user(&self, user_id: Uuid) -> Result<f64>;
}

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// 插入新用户，登录名冲突时返回 `AlreadyExists`
    async fn save(&self, login: &str, password_hash: &str) -> Result<User>;

    /// 按登录名查找
    async fn find_by_login(&self, login: &str) -> Result<Option<User>>;
}
