use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BookingService, booking_not_found, load_booking};
use crate::models::ApiResponse;
use crate::services::current_user;

pub async fn get_booking(
    service: &BookingService,
    booking_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request)?;

    let booking = match load_booking(&storage, booking_id).await {
        Ok(booking) => booking,
        Err(resp) => return Ok(resp),
    };

    // 只有参与方和管理员可见
    if !user.is_admin() && !booking.is_participant(user.id) {
        return Ok(booking_not_found());
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        booking,
        "Booking retrieved successfully",
    )))
}
