//! 订单处理器

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::OrderResponse;
use crate::error::{ApiError, Result};
use crate::middleware::AuthUser;
use crate::service::OrderSubmission;
use crate::state::AppState;

/// POST /api/user/orders
///
/// 请求体为 text/plain 的订单号。处理器立即返回，
/// 对账在后台任务中进行，结果只能通过后续查询观察到。
pub async fn submit_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: String,
) -> Result<StatusCode> {
    let number = body.trim();
    if number.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    match state.order_service.submit(user.id, number).await? {
        OrderSubmission::Accepted => Ok(StatusCode::ACCEPTED),
        OrderSubmission::AlreadyAccepted => Ok(StatusCode::OK),
    }
}

/// GET /api/user/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response> {
    let orders = state.order_service.list_orders(user.id).await?;

    if orders.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let views: Vec<OrderResponse> = orders.iter().map(OrderResponse::from).collect();
    Ok((StatusCode::OK, Json(views)).into_response())
}
