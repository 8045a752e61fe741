use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TutorService;
use crate::models::{
    ApiResponse, ErrorCode,
    users::entities::{UserRole, UserStatus},
    users::requests::{DirectoryQueryParams, UserListQuery},
};
use crate::services::internal_error;

pub async fn list_tutors(
    service: &TutorService,
    query: DirectoryQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 只展示活跃导师
    let list_query = UserListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        role: Some(UserRole::Tutor),
        status: Some(UserStatus::Active),
        search: query.search,
        ids: None,
    };

    match storage.list_users_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Tutor list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            format!("Failed to retrieve tutor list: {e}"),
        )),
    }
}
