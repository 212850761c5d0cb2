//! 轮询策略
//!
//! 为对账任务提供固定间隔的轮询配置。与指数退避不同，
//! 对外部核算服务的查询使用平坦间隔：每次轮询之间等待相同时长，
//! 直到尝试次数预算耗尽。

use std::time::Duration;

/// 轮询策略配置
///
/// `max_attempts` 是每个订单的总预算：Registered/Processing 响应和
/// 网络瞬时故障都会消耗一次尝试；上游暂停信号（204/5xx）不消耗。
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    /// 相邻两次轮询之间的固定间隔
    pub interval: Duration,
    /// 最大轮询次数
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    /// 默认策略：300 毫秒间隔，最多 15 次
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(300),
            max_attempts: 15,
        }
    }
}

impl PollPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }

    /// 预算是否已耗尽
    ///
    /// attempt 表示已经消耗的尝试次数（从 0 开始计数），
    /// 当 attempt >= max_attempts 时预算耗尽。
    pub fn exhausted(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }
}
