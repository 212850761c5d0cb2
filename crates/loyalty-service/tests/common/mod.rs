//! 集成测试共用的内存仓储与脚本化核算客户端
//!
//! 不依赖数据库和网络，行为与真实实现保持一致：
//! 订单号唯一约束、提现的余额校验串行化、按创建顺序返回列表。

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use loyalty_shared::error::{LoyaltyError, Result};
use uuid::Uuid;

use loyalty_service::accrual::{AccrualOutcome, AccrualService};
use loyalty_service::models::{Order, OrderStatus, Withdrawal};
use loyalty_service::repository::{OrderRepositoryTrait, WithdrawalRepositoryTrait};

/// 内存订单仓储
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
    next_id: AtomicI64,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 测试断言用：按订单号取快照
    pub fn get(&self, number: &str) -> Option<Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.number == number)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderRepositoryTrait for InMemoryOrderRepository {
    async fn save(&self, user_id: Uuid, number: &str) -> Result<Order> {
        let mut orders = self.orders.lock().unwrap();
        if orders.iter().any(|o| o.number == number) {
            return Err(LoyaltyError::AlreadyExists {
                entity: "订单".to_string(),
                key: number.to_string(),
            });
        }

        let now = Utc::now();
        let order = Order {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id,
            number: number.to_string(),
            status: OrderStatus::New,
            accrual: None,
            created_at: now,
            updated_at: now,
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_number(&self, number: &str) -> Result<Option<Order>> {
        Ok(self.get(number))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    async fn update_by_number(
        &self,
        number: &str,
        status: OrderStatus,
        accrual: Option<f64>,
    ) -> Result<()> {
        let mut orders = self.orders.lock().unwrap();
        if let Some(order) = orders.iter_mut().find(|o| o.number == number) {
            order.status = status;
            order.accrual = accrual;
            order.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn sum_accruals_by_user(&self, user_id: Uuid) -> Result<f64> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.user_id == user_id)
            .filter_map(|o| o.accrual)
            .sum())
    }
}

/// 内存提现仓储
///
/// save_checked 持 tokio Mutex 完成重查+插入，
/// 与真实实现的用户级咨询锁一样把并发提现串行化。
pub struct InMemoryWithdrawalRepository {
    orders: Arc<InMemoryOrderRepository>,
    withdrawals: tokio::sync::Mutex<Vec<Withdrawal>>,
}

impl InMemoryWithdrawalRepository {
    pub fn new(orders: Arc<InMemoryOrderRepository>) -> Self {
        Self {
            orders,
            withdrawals: tokio::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl WithdrawalRepositoryTrait for InMemoryWithdrawalRepository {
    async fn save_checked(
        &self,
        user_id: Uuid,
        order_number: &str,
        amount: f64,
    ) -> Result<Withdrawal> {
        let mut withdrawals = self.withdrawals.lock().await;

        let accrued = self.orders.sum_accruals_by_user(user_id).await?;
        let withdrawn: f64 = withdrawals
            .iter()
            .filter(|w| w.user_id == user_id)
            .map(|w| w.amount)
            .sum();

        let available = accrued - withdrawn;
        if available - amount < 0.0 {
            return Err(LoyaltyError::InsufficientFunds {
                required: amount,
                available,
            });
        }

        let withdrawal = Withdrawal {
            id: Uuid::new_v4(),
            user_id,
            order_number: order_number.to_string(),
            amount,
            processed_at: Utc::now(),
        };
        withdrawals.push(withdrawal.clone());
        Ok(withdrawal)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Withdrawal>> {
        Ok(self
            .withdrawals
            .lock()
            .await
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn sum_amounts_by_user(&self, user_id: Uuid) -> Result<f64> {
        Ok(self
            .withdrawals
            .lock()
            .await
            .iter()
            .filter(|w| w.user_id == user_id)
            .map(|w| w.amount)
            .sum())
    }
}

/// 脚本化核算客户端
///
/// 按顺序回放预设的结果序列，序列耗尽后返回 fallback。
pub struct ScriptedAccrualClient {
    script: Mutex<VecDeque<AccrualOutcome>>,
    fallback: AccrualOutcome,
    calls: AtomicU32,
}

impl ScriptedAccrualClient {
    pub fn new(script: Vec<AccrualOutcome>, fallback: AccrualOutcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicU32::new(0),
        }
    }

    /// 已发生的查询次数
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccrualService for ScriptedAccrualClient {
    async fn query(&self, _number: &str) -> AccrualOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback)
    }
}
