//! 请求 DTO

use serde::Deserialize;
use validator::Validate;

/// 注册/登录请求，两个端点共用同一载荷
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(length(min = 1, max = 255, message = "登录名不能为空"))]
    pub login: String,
    #[validate(length(min = 1, max = 255, message = "密码不能为空"))]
    pub password: String,
}

/// 提现请求
///
/// order 是外部商户订单号，sum 为提现积分数
#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    pub order: String,
    pub sum: f64,
}
