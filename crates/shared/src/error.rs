//! 统一错误处理模块
//!
//! 定义积分服务共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 积分服务错误类型
#[derive(Debug, Error)]
pub enum LoyaltyError {
    // ==================== 数据库错误 ====================
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("记录未找到: {entity} {key}")]
    NotFound { entity: String, key: String },

    #[error("记录已存在: {entity} {key}")]
    AlreadyExists { entity: String, key: String },

    // ==================== 业务逻辑错误 ====================
    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("积分余额不足: 需要 {required}, 可用 {available}")]
    InsufficientFunds { required: f64, available: f64 },

    // ==================== 外部服务错误 ====================
    #[error("外部服务错误: {service} - {message}")]
    ExternalService { service: String, message: String },

    // ==================== 通用错误 ====================
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, LoyaltyError>;

impl LoyaltyError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 校验失败和业务拒绝不应被重试，基础设施故障可以。
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Database(_) | Self::ExternalService { .. })
    }
}
