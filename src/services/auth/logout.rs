use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::utils::jwt::{ACCESS_TOKEN_COOKIE, JwtUtils, REFRESH_TOKEN_COOKIE};

/// 处理用户登出
/// 清除两个会话 Cookie（max_age=0），并清除该用户的认证缓存
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(user) = RequireJWT::try_authenticate(request).await {
        RequireJWT::evict_user(request, user.id).await;
        tracing::info!("User {} logged out", user.username);
    }

    Ok(HttpResponse::Ok()
        .cookie(JwtUtils::create_empty_cookie(ACCESS_TOKEN_COOKIE))
        .cookie(JwtUtils::create_empty_cookie(REFRESH_TOKEN_COOKIE))
        .json(ApiResponse::<()>::success_empty("Logout successful")))
}
