//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::json;

use crate::{handlers, state::AppState};

/// 构建全部 API 路由
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 注册/登录（公开路由）
        .route("/api/user/register", post(handlers::user::register))
        .route("/api/user/login", post(handlers::user::login))
        // 订单
        .route("/api/user/orders", post(handlers::order::submit_order))
        .route("/api/user/orders", get(handlers::order::list_orders))
        // 余额与提现
        .route("/api/user/balance", get(handlers::balance::get_balance))
        .route(
            "/api/user/balance/withdraw",
            post(handlers::withdrawal::withdraw),
        )
        .route(
            "/api/user/withdrawals",
            get(handlers::withdrawal::list_withdrawals),
        )
        // 健康检查
        .route("/health", get(health))
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
