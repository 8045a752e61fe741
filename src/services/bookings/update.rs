use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BookingService, booking_forbidden, booking_not_found, load_booking, validate_schedule};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    bookings::{entities::BookingStatus, requests::UpdateBookingRequest},
};
use crate::services::{current_user, internal_error};

pub async fn update_booking(
    service: &BookingService,
    booking_id: i64,
    mut update_data: UpdateBookingRequest,
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

    if !user.is_admin() && !booking.is_participant(user.id) {
        return Ok(booking_not_found());
    }
    if booking.student_id != user.id {
        return Ok(booking_forbidden("Only the student can edit this booking"));
    }
    if booking.status != BookingStatus::Pending {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BookingInvalid,
            "Only pending bookings can be edited",
        )));
    }

    if update_data.scheduled_at.is_some() || update_data.duration_minutes.is_some() {
        let scheduled_at = update_data.scheduled_at.unwrap_or(booking.scheduled_at);
        let duration = update_data
            .duration_minutes
            .unwrap_or(booking.duration_minutes);
        if let Err(msg) = validate_schedule(
            scheduled_at,
            duration,
            chrono::Utc::now(),
            &AppConfig::get().booking,
        ) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BookingInvalid, msg)));
        }
    }
    update_data.note = update_data.note.map(|n| n.trim().to_string());

    match storage.update_booking(booking_id, update_data).await {
        Ok(Some(booking)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(booking, "Booking updated successfully"))),
        Ok(None) => Ok(booking_not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::BookingUpdateFailed,
            format!("Booking update failed: {e}"),
        )),
    }
}
