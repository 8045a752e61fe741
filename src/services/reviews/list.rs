use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReviewService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::courses::{can_view, course_not_found, load_course};
use crate::services::internal_error;

pub async fn list_reviews(
    service: &ReviewService,
    course_id: i64,
    pagination: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = RequireJWT::try_authenticate(request).await;

    match load_course(&storage, course_id).await {
        Ok(course) if can_view(viewer.as_ref(), &course) => {}
        Ok(_) => return Ok(course_not_found()),
        Err(resp) => return Ok(resp),
    }

    match storage.list_course_reviews(course_id, pagination).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Reviews retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            format!("Failed to retrieve reviews: {e}"),
        )),
    }
}
