//! 密码哈希
//!
//! bcrypt 封装，哈希失败统一映射为内部错误

use crate::error::ApiError;

/// 使用 bcrypt 哈希密码
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("密码哈希失败: {e}")))
}

/// 校验明文密码与哈希是否匹配
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    bcrypt::verify(password, hash).map_err(|e| ApiError::Internal(format!("密码校验失败: {e}")))
}
