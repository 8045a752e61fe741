use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BookingService, booking_forbidden, booking_not_found};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, internal_error};

pub async fn delete_booking(
    service: &BookingService,
    booking_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match current_user(request) {
        Ok(user) if user.is_admin() => {}
        Ok(_) => return Ok(booking_forbidden("Only administrators can delete bookings")),
        Err(resp) => return Ok(resp),
    }

    let storage = service.get_storage(request)?;

    match storage.delete_booking(booking_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Booking deleted successfully",
        ))),
        Ok(false) => Ok(booking_not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::BookingUpdateFailed,
            format!("Booking deletion failed: {e}"),
        )),
    }
}
