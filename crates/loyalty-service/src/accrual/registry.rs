//! 在途对账任务注册表
//!
//! 订单服务派生任务后不等待其完成，但句柄保留在注册表中，
//! 运维侧由此获得检视与取消在途对账的能力；进程优雅关闭时
//! 通过 `shutdown` 统一中止。同一订单号至多注册一个任务
//! （订单创建时恰好派生一次）。

use std::sync::Arc;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::worker::ReconciliationWorker;

/// 对账任务注册表
#[derive(Default)]
pub struct WorkerRegistry {
    tasks: DashMap<String, JoinHandle<()>>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为一个订单号派生对账任务并保留句柄
    ///
    /// 顺带清理已结束任务的句柄，注册表大小与在途任务数同阶。
    pub fn spawn(&self, worker: Arc<ReconciliationWorker>, number: String) {
        self.tasks.retain(|_, handle| !handle.is_finished());

        let key = number.clone();
        let handle = tokio::spawn(async move {
            worker.reconcile(&number).await;
        });

        debug!(number = %key, "对账任务已派生");
        self.tasks.insert(key, handle);
    }

    /// 仍在运行的对账任务对应的订单号
    pub fn in_flight(&self) -> Vec<String> {
        self.tasks
            .iter()
            .filter(|entry| !entry.value().is_finished())
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// 取消单个订单的对账任务，返回是否存在该任务
    pub fn cancel(&self, number: &str) -> bool {
        match self.tasks.remove(number) {
            Some((_, handle)) => {
                handle.abort();
                info!(number, "对账任务已取消");
                true
            }
            None => false,
        }
    }

    /// 等待单个订单的对账任务结束（任务句柄随之移出注册表）
    pub async fn wait(&self, number: &str) {
        if let Some((_, handle)) = self.tasks.remove(number) {
            let _ = handle.await;
        }
    }

    /// 中止所有在途任务
    pub fn shutdown(&self) {
        let count = self.tasks.len();
        self.tasks.retain(|_, handle| {
            handle.abort();
            false
        });
        if count > 0 {
            info!(count, "已中止在途对账任务");
        }
    }
}
