use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, visible_student_ids};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, responses::UserResponse},
};
use crate::services::{current_user, internal_error};

pub async fn get_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let viewer = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let not_found = || {
        HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Student not found",
        ))
    };

    // 导师看不到的学生同样按不存在处理
    match visible_student_ids(&storage, &viewer).await {
        Ok(Some(ids)) if !ids.contains(&student_id) => return Ok(not_found()),
        Ok(_) => {}
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to resolve students: {e}"),
            ));
        }
    }

    match storage.get_user_by_id(student_id).await {
        Ok(Some(user)) if user.role == UserRole::Student => Ok(HttpResponse::Ok().json(
            ApiResponse::success(UserResponse { user }, "Student retrieved successfully"),
        )),
        Ok(_) => Ok(not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            format!("Failed to retrieve student: {e}"),
        )),
    }
}
