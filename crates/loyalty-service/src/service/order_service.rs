//! 订单服务
//!
//! 校验订单号、按订单号去重、创建新订单并为其派生对账任务。
//! 重复提交和归属冲突是业务结果而非系统错误。

use std::sync::Arc;

use loyalty_shared::error::{LoyaltyError, Result};
use tracing::info;
use uuid::Uuid;

use crate::accrual::{ReconciliationWorker, WorkerRegistry};
use crate::luhn;
use crate::models::Order;
use crate::repository::OrderRepositoryTrait;

/// 订单提交的业务结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSubmission {
    /// 新订单已接受，对账任务已派生
    Accepted,
    /// 同一用户重复提交，幂等返回
    AlreadyAccepted,
}

/// 订单服务
pub struct OrderService {
    orders: Arc<dyn OrderRepositoryTrait>,
    worker: Arc<ReconciliationWorker>,
    registry: Arc<WorkerRegistry>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepositoryTrait>,
        worker: Arc<ReconciliationWorker>,
        registry: Arc<WorkerRegistry>,
    ) -> Self {
        Self {
            orders,
            worker,
            registry,
        }
    }

    /// 提交订单号
    ///
    /// 未知订单号创建 NEW 状态订单并派生对账任务；本人已提交过的
    /// 订单号返回 `AlreadyAccepted`；他人已提交过的返回
    /// `AlreadyExists`（边界层映射为 409）。
    pub async fn submit(&self, user_id: Uuid, number: &str) -> Result<OrderSubmission> {
        if !luhn::is_valid(number) {
            return Err(LoyaltyError::Validation(format!(
                "订单号未通过 Luhn 校验: {number}"
            )));
        }

        match self.orders.find_by_number(number).await? {
            None => {
                let order = self.orders.save(user_id, number).await?;
                info!(number = %order.number, %user_id, "新订单已接受");
                self.registry.spawn(self.worker.clone(), order.number);
                Ok(OrderSubmission::Accepted)
            }
            Some(existing) if existing.user_id == user_id => Ok(OrderSubmission::AlreadyAccepted),
            Some(_) => Err(LoyaltyError::AlreadyExists {
                entity: "订单".to_string(),
                key: number.to_string(),
            }),
        }
    }

    /// 用户的全部订单，按提交时间升序；空列表是合法结果
    pub async fn list_orders(&self, user_id: Uuid) -> Result<Vec<Order>> {
        self.orders.find_by_user(user_id).await
    }
}
