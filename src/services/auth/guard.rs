use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, auth::GuardQuery};
use crate::services::navigation::resolve_route;

pub async fn handle_guard(query: GuardQuery, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let role = RequireJWT::try_authenticate(request)
        .await
        .map(|user| user.role);

    let decision = resolve_route(&query.path, role);
    Ok(HttpResponse::Ok().json(ApiResponse::success(decision, "Route evaluated")))
}
