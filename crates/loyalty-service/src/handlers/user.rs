//! 注册/登录处理器

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use validator::Validate;

use crate::dto::{AuthResponse, CredentialsRequest};
use crate::error::Result;
use crate::state::AppState;

/// POST /api/user/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response> {
    req.validate()?;

    let (_, token) = state.user_service.register(&req.login, &req.password).await?;

    Ok(auth_response(token))
}

/// POST /api/user/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Response> {
    req.validate()?;

    let (_, token) = state.user_service.login(&req.login, &req.password).await?;

    Ok(auth_response(token))
}

/// 令牌同时通过响应体、Authorization 头和 Cookie 下发，
/// 客户端可任选一种方式在后续请求中携带。
fn auth_response(token: String) -> Response {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
        headers.insert(header::AUTHORIZATION, value);
    }
    if let Ok(value) = HeaderValue::from_str(&format!("token={token}; HttpOnly; Path=/")) {
        headers.insert(header::SET_COOKIE, value);
    }

    (StatusCode::OK, headers, Json(AuthResponse { token })).into_response()
}
