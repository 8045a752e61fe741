use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TutorService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, responses::TutorDetailResponse},
};
use crate::services::internal_error;

pub async fn get_tutor(
    service: &TutorService,
    tutor_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let tutor = match storage.get_user_by_id(tutor_id).await {
        // 与目录列表一致：只公开活跃导师
        Ok(Some(user)) if user.role == UserRole::Tutor && user.is_active() => user,
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Tutor not found",
            )));
        }
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to retrieve tutor: {e}"),
            ));
        }
    };

    let course_count = match storage.count_courses(Some(tutor.id), true).await {
        Ok(count) => count,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to count courses: {e}"),
            ));
        }
    };

    let summary = match storage.get_tutor_rating_summary(tutor.id).await {
        Ok(summary) => summary,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to load rating summary: {e}"),
            ));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TutorDetailResponse {
            tutor,
            course_count,
            review_count: summary.review_count,
            average_rating: summary.average_rating,
        },
        "Tutor retrieved successfully",
    )))
}
