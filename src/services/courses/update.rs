use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, can_manage, course_forbidden, load_course, validate_course_fields};
use crate::models::{
    ApiResponse, ErrorCode, activities::entities::ActivityAction,
    courses::requests::UpdateCourseRequest,
};
use crate::services::{activities, current_user, internal_error};

pub async fn update_course(
    service: &CourseService,
    course_id: i64,
    mut update_data: UpdateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_course_fields(
        update_data.title.as_deref(),
        update_data.price,
        update_data.duration_minutes,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CourseInvalid, msg)));
    }
    update_data.title = update_data.title.map(|t| t.trim().to_string());

    let storage = service.get_storage(request)?;

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    // 权限校验
    if !can_manage(&user, &course) {
        return Ok(course_forbidden());
    }

    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => {
            activities::record(
                &storage,
                user.id,
                ActivityAction::CourseUpdated,
                format!("Updated course \"{}\"", course.title),
            )
            .await;
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(course, "Course updated successfully")))
        }
        Ok(None) => Ok(super::course_not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::CourseUpdateFailed,
            format!("Course update failed: {e}"),
        )),
    }
}
