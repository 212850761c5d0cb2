//! 余额处理器

use axum::{Extension, Json, extract::State};

use crate::dto::BalanceResponse;
use crate::error::Result;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /api/user/balance
pub async fn get_balance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<BalanceResponse>> {
    let balance = state.balance_service.current_balance(user.id).await?;
    Ok(Json(balance.into()))
}
