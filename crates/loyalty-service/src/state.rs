//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use crate::accrual::WorkerRegistry;
use crate::auth::JwtManager;
use crate::service::{BalanceService, OrderService, UserService, WithdrawalService};

/// Axum 应用共享状态
///
/// 所有组件在进程入口一次性装配后通过 Arc 在 handler 间共享，
/// 没有任何进程级可变单例。
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池
    pub pool: PgPool,
    pub jwt: Arc<JwtManager>,
    pub user_service: Arc<UserService>,
    pub order_service: Arc<OrderService>,
    pub balance_service: Arc<BalanceService>,
    pub withdrawal_service: Arc<WithdrawalService>,
    /// 在途对账任务注册表，优雅关闭时统一中止
    pub registry: Arc<WorkerRegistry>,
}

impl AppState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        jwt: Arc<JwtManager>,
        user_service: Arc<UserService>,
        order_service: Arc<OrderService>,
        balance_service: Arc<BalanceService>,
        withdrawal_service: Arc<WithdrawalService>,
        registry: Arc<WorkerRegistry>,
    ) -> Self {
        Self {
            pool,
            jwt,
            user_service,
            order_service,
            balance_service,
            withdrawal_service,
            registry,
        }
    }
}
