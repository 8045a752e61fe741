use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CourseService, can_manage, course_forbidden, course_not_found, load_course};
use crate::models::{ApiResponse, ErrorCode, activities::entities::ActivityAction};
use crate::services::{activities, current_user, internal_error};

pub async fn delete_course(
    service: &CourseService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    if !can_manage(&user, &course) {
        return Ok(course_forbidden());
    }

    // 预约、评价和课程资料由外键级联删除
    match storage.delete_course(course_id).await {
        Ok(true) => {
            activities::record(
                &storage,
                user.id,
                ActivityAction::CourseDeleted,
                format!("Deleted course \"{}\"", course.title),
            )
            .await;
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Course deleted successfully")))
        }
        Ok(false) => Ok(course_not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::CourseDeleteFailed,
            format!("Course deletion failed: {e}"),
        )),
    }
}
