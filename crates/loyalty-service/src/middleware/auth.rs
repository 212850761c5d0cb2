//! JWT 认证中间件
//!
//! 从 Authorization 头或 token Cookie 中提取令牌，验证后把
//! 已解析的用户身份注入请求扩展；核心业务只信任这里给出的身份。

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use uuid::Uuid;

use crate::state::AppState;

/// 已认证的用户身份
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

/// 认证中间件
///
/// 对于公开路由（注册/登录/健康检查）跳过验证。
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    // 公开路由列表（不需要认证）
    let public_paths = ["/api/user/register", "/api/user/login", "/health"];
    if public_paths.contains(&path) {
        return next.run(request).await;
    }

    let Some(token) = extract_token(&request) else {
        return unauthorized_response("缺少认证 Token");
    };

    let claims = match state.jwt.verify(&token) {
        Ok(claims) => claims,
        Err(e) => return unauthorized_response(&e.to_string()),
    };

    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        return unauthorized_response("Token 载荷不合法");
    };

    request.extensions_mut().insert(AuthUser { id: user_id });
    next.run(request).await
}

/// 先看 Authorization: Bearer，再回退到 token Cookie
fn extract_token(request: &Request<Body>) -> Option<String> {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    request
        .headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == "token").then(|| value.to_string())
            })
        })
}

/// 生成 401 未授权响应
fn unauthorized_response(message: &str) -> Response {
    let body = json!({
        "success": false,
        "code": "UNAUTHORIZED",
        "message": message,
    });

    (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
}
