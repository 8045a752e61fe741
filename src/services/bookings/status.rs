use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BookingService, booking_forbidden, booking_not_found, load_booking};
use crate::models::{
    ApiResponse, ErrorCode,
    activities::entities::ActivityAction,
    bookings::{
        entities::{BookingActor, BookingStatus},
        requests::UpdateBookingStatusRequest,
    },
    notifications::entities::NotificationKind,
};
use crate::services::{activities, current_user, internal_error, notifications};

pub async fn update_status(
    service: &BookingService,
    booking_id: i64,
    status_data: UpdateBookingStatusRequest,
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

    let Some(actor) = BookingActor::resolve(user.id, user.role, &booking) else {
        return Ok(booking_not_found());
    };

    let next = status_data.status;

    // 先校验状态机，再校验操作方权限
    if !booking.status.can_transition_to(next) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BookingStatusTransitionInvalid,
            format!("Cannot change booking from {} to {}", booking.status, next),
        )));
    }
    if !booking.status.actor_may_transition(next, actor) {
        return Ok(booking_forbidden("Students may only cancel their bookings"));
    }

    let updated = match storage.update_booking_status(booking_id, next).await {
        Ok(Some(updated)) => updated,
        Ok(None) => return Ok(booking_not_found()),
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::BookingUpdateFailed,
                format!("Booking status update failed: {e}"),
            ));
        }
    };

    // 通知另一方；管理员操作时双方都通知
    let recipients: Vec<i64> = match actor {
        BookingActor::Student => vec![updated.tutor_id],
        BookingActor::Tutor => vec![updated.student_id],
        BookingActor::Admin => vec![updated.student_id, updated.tutor_id],
    };
    let title = match next {
        BookingStatus::Confirmed => "Booking confirmed",
        BookingStatus::Completed => "Session completed",
        BookingStatus::Cancelled => "Booking cancelled",
        BookingStatus::Pending => "Booking updated",
    };
    for recipient in recipients {
        notifications::notify(
            &storage,
            recipient,
            NotificationKind::BookingUpdated,
            title,
            format!(
                "Booking {} is now {} (by {})",
                updated.reference,
                next,
                user.display_name()
            ),
        )
        .await;
    }

    activities::record(
        &storage,
        user.id,
        ActivityAction::BookingStatusChanged,
        format!("Booking {} changed to {}", updated.reference, next),
    )
    .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        updated,
        "Booking status updated successfully",
    )))
}
