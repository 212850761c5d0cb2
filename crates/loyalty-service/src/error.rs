//! 服务错误类型
//!
//! 在共享库 LoyaltyError 基础上定义 HTTP 边界的错误变体，
//! 并实现 IntoResponse 完成到状态码的映射。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use loyalty_shared::error::LoyaltyError;
use serde_json::json;

/// HTTP 边界错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 认证错误
    #[error("未授权: {0}")]
    Unauthorized(String),
    #[error("登录名或密码错误")]
    InvalidCredentials,
    #[error("登录名已被占用: {0}")]
    LoginTaken(String),

    // 请求错误
    #[error("请求格式错误: {0}")]
    BadRequest(String),
    #[error("请求体为空")]
    EmptyBody,

    // 共享库错误透传（校验失败、归属冲突、余额不足、存储错误等）
    #[error(transparent)]
    Shared(#[from] LoyaltyError),

    // 系统错误
    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::LoginTaken(_) => StatusCode::CONFLICT,
            Self::BadRequest(_) | Self::EmptyBody => StatusCode::BAD_REQUEST,
            Self::Shared(inner) => match inner {
                LoyaltyError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                LoyaltyError::AlreadyExists { .. } => StatusCode::CONFLICT,
                LoyaltyError::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
                LoyaltyError::NotFound { .. } => StatusCode::NOT_FOUND,
                LoyaltyError::Database(_)
                | LoyaltyError::ExternalService { .. }
                | LoyaltyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::LoginTaken(_) => "LOGIN_TAKEN",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::EmptyBody => "EMPTY_BODY",
            Self::Shared(inner) => inner.code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Shared(LoyaltyError::Database(e)) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Shared(LoyaltyError::Internal(e)) | Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换（注册/登录等 JSON 载荷的格式校验）
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::BadRequest(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::EmptyBody.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(LoyaltyError::Validation("bad".into())).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(LoyaltyError::AlreadyExists {
                entity: "订单".into(),
                key: "1".into()
            })
            .status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(LoyaltyError::InsufficientFunds {
                required: 100.0,
                available: 1.0
            })
            .status_code(),
            StatusCode::PAYMENT_REQUIRED
        );
    }

    #[test]
    fn test_error_code_passthrough() {
        let err = ApiError::from(LoyaltyError::InsufficientFunds {
            required: 100.0,
            available: 1.0,
        });
        assert_eq!(err.error_code(), "INSUFFICIENT_FUNDS");
    }
}
