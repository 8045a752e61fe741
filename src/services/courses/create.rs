use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, validate_course_fields};
use crate::models::{
    ApiResponse, ErrorCode,
    activities::entities::ActivityAction,
    courses::requests::CreateCourseRequest,
    users::entities::UserRole,
};
use crate::services::{activities, current_user, internal_error};

pub async fn create_course(
    service: &CourseService,
    mut course_data: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    if let Err(msg) = validate_course_fields(
        Some(&course_data.title),
        Some(course_data.price),
        Some(course_data.duration_minutes),
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CourseInvalid, msg)));
    }
    course_data.title = course_data.title.trim().to_string();

    let storage = service.get_storage(request)?;

    // 确定授课导师
    let tutor_id = match user.role {
        UserRole::Tutor => match course_data.tutor_id {
            Some(id) if id != user.id => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::CoursePermissionDenied,
                    "Tutors can only create courses for themselves",
                )));
            }
            _ => user.id,
        },
        UserRole::Admin => {
            let Some(tutor_id) = course_data.tutor_id else {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::CourseInvalid,
                    "tutor_id is required when an admin creates a course",
                )));
            };
            match storage.get_user_by_id(tutor_id).await {
                Ok(Some(tutor)) if tutor.role == UserRole::Tutor => tutor.id,
                Ok(_) => {
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::CourseInvalid,
                        "tutor_id must reference a tutor",
                    )));
                }
                Err(e) => {
                    return Ok(internal_error(
                        ErrorCode::CourseCreationFailed,
                        format!("Failed to verify tutor: {e}"),
                    ));
                }
            }
        }
        UserRole::Student => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::CoursePermissionDenied,
                "Students cannot create courses",
            )));
        }
    };
    course_data.tutor_id = Some(tutor_id);

    match storage.create_course(course_data).await {
        Ok(course) => {
            activities::record(
                &storage,
                user.id,
                ActivityAction::CourseCreated,
                format!("Created course \"{}\"", course.title),
            )
            .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(internal_error(
            ErrorCode::CourseCreationFailed,
            format!("Course creation failed: {e}"),
        )),
    }
}
