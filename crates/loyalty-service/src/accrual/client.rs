//! 外部核算服务客户端
//!
//! 对单个订单号发起一次有界 HTTP 请求，并在边界处把松散的响应
//! 载荷一次性解码为带标签的结果枚举，之后的代码不再接触原始报文。
//! 预期内的非 2xx 响应不会作为错误抛出，只有网络层故障映射为
//! `TransientError`。通过 `AccrualService` trait 抽象调用，
//! 便于测试时注入脚本化实现。

use async_trait::async_trait;
use loyalty_shared::config::AccrualConfig;
use loyalty_shared::error::{LoyaltyError, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// 核算服务响应载荷
#[derive(Debug, Deserialize)]
struct AccrualReply {
    #[allow(dead_code)]
    order: String,
    status: AccrualReplyStatus,
    accrual: Option<f64>,
}

/// 核算服务返回的订单状态字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum AccrualReplyStatus {
    Registered,
    Processing,
    Invalid,
    Processed,
}

/// 单次核算查询的结果
///
/// - `Registered` / `Processing`: 上游仍在计算，继续轮询
/// - `Processed` / `Invalid`: 终态，写库后停止
/// - `Suspend`: 上游暂无信息或过载（204/429/5xx），本轮暂停且不消耗尝试次数
/// - `TransientError`: 网络层故障，记录后按普通尝试重试
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccrualOutcome {
    Registered,
    Processing,
    Processed(f64),
    Invalid,
    Suspend,
    TransientError,
}

/// 核算服务调用的抽象接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccrualService: Send + Sync {
    /// 查询一个订单号的核算进度
    async fn query(&self, number: &str) -> AccrualOutcome;
}

/// 基于 reqwest 的核算服务客户端
///
/// 客户端内部带连接池，clone 是廉价操作。
pub struct AccrualClient {
    http: reqwest::Client,
    base_url: String,
}

impl AccrualClient {
    /// 创建客户端，请求超时取自配置
    pub fn new(config: &AccrualConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| LoyaltyError::ExternalService {
                service: "accrual".to_string(),
                message: format!("HTTP 客户端构建失败: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AccrualService for AccrualClient {
    async fn query(&self, number: &str) -> AccrualOutcome {
        let url = format!("{}/api/orders/{}", self.base_url, number);

        let response = match self.http.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(number, error = %e, "核算服务请求失败");
                return AccrualOutcome::TransientError;
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<AccrualReply>().await {
                Ok(reply) => map_reply(number, reply),
                Err(e) => {
                    warn!(number, error = %e, "核算服务响应解析失败");
                    AccrualOutcome::TransientError
                }
            },
            StatusCode::NO_CONTENT => {
                debug!(number, "核算服务暂无该订单信息");
                AccrualOutcome::Suspend
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!(number, "核算服务限流");
                AccrualOutcome::Suspend
            }
            status if status.is_server_error() => {
                warn!(number, %status, "核算服务过载");
                AccrualOutcome::Suspend
            }
            status => {
                warn!(number, %status, "核算服务返回未预期的状态码");
                AccrualOutcome::TransientError
            }
        }
    }
}

/// 把解码后的载荷映射为结果枚举
fn map_reply(number: &str, reply: AccrualReply) -> AccrualOutcome {
    match reply.status {
        AccrualReplyStatus::Registered => AccrualOutcome::Registered,
        AccrualReplyStatus::Processing => AccrualOutcome::Processing,
        AccrualReplyStatus::Invalid => AccrualOutcome::Invalid,
        AccrualReplyStatus::Processed => {
            let amount = reply.accrual.unwrap_or_else(|| {
                debug!(number, "PROCESSED 响应缺少 accrual 字段，按 0 记账");
                0.0
            });
            AccrualOutcome::Processed(amount)
        }
    }
}
