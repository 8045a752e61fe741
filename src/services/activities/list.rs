use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ActivityService;
use crate::models::{ApiResponse, ErrorCode, activities::requests::ActivityQueryParams};
use crate::services::{current_user, internal_error};

pub async fn list_activities(
    service: &ActivityService,
    query: ActivityQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

    // 非管理员只能查看自己的动态
    let target_id = match query.user_id {
        Some(id) if id != user.id && !user.is_admin() => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "You can only view your own activities",
            )));
        }
        Some(id) => id,
        None => user.id,
    };

    let storage = service.get_storage(request)?;
    match storage
        .list_activities_with_pagination(target_id, query.pagination)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Activities retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            format!("Failed to retrieve activities: {e}"),
        )),
    }
}
