use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, visible_student_ids};
use crate::models::{
    ApiResponse, ErrorCode,
    users::entities::UserRole,
    users::requests::{DirectoryQueryParams, UserListQuery},
};
use crate::services::{current_user, internal_error};

pub async fn list_students(
    service: &StudentService,
    query: DirectoryQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let viewer = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let ids = match visible_student_ids(&storage, &viewer).await {
        Ok(ids) => ids,
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to resolve students: {e}"),
            ));
        }
    };

    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: Some(UserRole::Student),
        status: None,
        search: query.search,
        ids,
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Student list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            format!("Failed to retrieve student list: {e}"),
        )),
    }
}
