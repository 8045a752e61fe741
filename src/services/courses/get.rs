use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, can_view, course_not_found, load_course};
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;

pub async fn get_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = RequireJWT::try_authenticate(request).await;

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    if !can_view(viewer.as_ref(), &course) {
        return Ok(course_not_found());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        course,
        "Course retrieved successfully",
    )))
}
