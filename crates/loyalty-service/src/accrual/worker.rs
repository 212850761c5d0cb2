//! 对账任务
//!
//! 每个新订单对应一个独立的异步任务：以固定间隔轮询核算服务，
//! 在终态结果出现时写库并结束；尝试次数预算耗尽时写入 ABANDONED
//! 放弃标记后结束。任务之间不共享可变状态，只通过订单仓储通信，
//! 失败从不向提交订单的请求传播。

use std::sync::Arc;

use loyalty_shared::poll::PollPolicy;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use super::client::{AccrualOutcome, AccrualService};
use crate::models::OrderStatus;
use crate::repository::OrderRepositoryTrait;

/// 订单对账任务
///
/// 自身无状态，可被任意多个订单共享；轮询进度（尝试计数）
/// 是 `reconcile` 调用栈上的局部变量。
pub struct ReconciliationWorker {
    policy: PollPolicy,
    client: Arc<dyn AccrualService>,
    orders: Arc<dyn OrderRepositoryTrait>,
}

impl ReconciliationWorker {
    pub fn new(
        policy: PollPolicy,
        client: Arc<dyn AccrualService>,
        orders: Arc<dyn OrderRepositoryTrait>,
    ) -> Self {
        Self {
            policy,
            client,
            orders,
        }
    }

    /// 轮询单个订单直到终态或预算耗尽
    ///
    /// 状态机：
    /// - `Registered`: 继续轮询，消耗一次尝试
    /// - `Processing`: 把 PROCESSING 写穿到仓储，消耗一次尝试
    /// - `Processed` / `Invalid`: 写入终态并结束；写库失败则消耗一次
    ///   尝试并在下个 tick 重试写入
    /// - `TransientError`: 记录日志，消耗一次尝试
    /// - `Suspend`: 本轮暂停，不消耗尝试
    pub async fn reconcile(&self, number: &str) {
        let mut ticker = tokio::time::interval(self.policy.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut attempt: u32 = 0;

        loop {
            ticker.tick().await;

            if self.policy.exhausted(attempt) {
                warn!(number, attempt, "对账预算耗尽，放弃该订单");
                if let Err(e) = self
                    .orders
                    .update_by_number(number, OrderStatus::Abandoned, None)
                    .await
                {
                    error!(number, error = %e, "写入放弃标记失败");
                }
                return;
            }

            match self.client.query(number).await {
                AccrualOutcome::Registered => {
                    debug!(number, attempt, "订单已登记，等待上游计算");
                    attempt += 1;
                }
                AccrualOutcome::Processing => {
                    if let Err(e) = self
                        .orders
                        .update_by_number(number, OrderStatus::Processing, None)
                        .await
                    {
                        error!(number, error = %e, "写入 PROCESSING 状态失败");
                    }
                    attempt += 1;
                }
                AccrualOutcome::Processed(amount) => {
                    match self
                        .orders
                        .update_by_number(number, OrderStatus::Processed, Some(amount))
                        .await
                    {
                        Ok(()) => {
                            info!(number, accrual = amount, "对账完成，积分已入账");
                            return;
                        }
                        Err(e) => {
                            // 终态写入失败不丢结果，下个 tick 重试
                            error!(number, error = %e, "写入 PROCESSED 状态失败");
                            attempt += 1;
                        }
                    }
                }
                AccrualOutcome::Invalid => {
                    match self
                        .orders
                        .update_by_number(number, OrderStatus::Invalid, None)
                        .await
                    {
                        Ok(()) => {
                            info!(number, "上游判定订单无效");
                            return;
                        }
                        Err(e) => {
                            error!(number, error = %e, "写入 INVALID 状态失败");
                            attempt += 1;
                        }
                    }
                }
                AccrualOutcome::TransientError => {
                    warn!(number, attempt, "核算服务暂不可达");
                    attempt += 1;
                }
                AccrualOutcome::Suspend => {
                    debug!(number, "上游暂停信号，本轮不计入尝试");
                }
            }
        }
    }
}
