//! 提现处理器

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::{WithdrawRequest, WithdrawalResponse};
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// POST /api/user/balance/withdraw
pub async fn withdraw(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<WithdrawRequest>,
) -> Result<StatusCode> {
    state
        .withdrawal_service
        .withdraw(user.id, &req.order, req.sum)
        .await?;

    Ok(StatusCode::OK)
}

/// GET /api/user/withdrawals
pub async fn list_withdrawals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response> {
    let withdrawals = state.withdrawal_service.list_withdrawals(user.id).await?;

    if withdrawals.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let views: Vec<WithdrawalResponse> =
        withdrawals.iter().map(WithdrawalResponse::from).collect();
    Ok((StatusCode::OK, Json(views)).into_response())
}
