use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::BookingService;
use crate::models::{
    ApiResponse, ErrorCode,
    bookings::requests::{BookingListQuery, BookingQueryParams},
    users::entities::UserRole,
};
use crate::services::{current_user, internal_error};

pub async fn list_bookings(
    service: &BookingService,
    query: BookingQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    // 按角色限定范围
    let (student_id, tutor_id) = match user.role {
        UserRole::Student => (Some(user.id), None),
        UserRole::Tutor => (None, Some(user.id)),
        UserRole::Admin => (None, None),
    };

    let list_query = BookingListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        student_id,
        tutor_id,
        course_id: query.course_id,
        status: query.status,
    };

    match storage.list_bookings_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Booking list retrieved successfully",
        ))),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            format!("Failed to retrieve booking list: {e}"),
        )),
    }
}
