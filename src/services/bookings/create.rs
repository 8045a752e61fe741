use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{BookingService, booking_forbidden, validate_schedule};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    activities::entities::ActivityAction,
    bookings::requests::{CreateBookingRequest, NewBooking},
    notifications::entities::NotificationKind,
    users::entities::UserRole,
};
use crate::services::courses::{course_not_found, load_course};
use crate::services::{activities, current_user, internal_error, notifications};

pub async fn create_booking(
    service: &BookingService,
    booking_data: CreateBookingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if student.role != UserRole::Student {
        return Ok(booking_forbidden("Only students can create bookings"));
    }
    let storage = service.get_storage(request)?;

    // 课程必须存在且已发布
    let course = match load_course(&storage, booking_data.course_id).await {
        Ok(course) if course.is_published => course,
        Ok(_) => return Ok(course_not_found()),
        Err(resp) => return Ok(resp),
    };

    let duration_minutes = booking_data
        .duration_minutes
        .unwrap_or(course.duration_minutes);

    if let Err(msg) = validate_schedule(
        booking_data.scheduled_at,
        duration_minutes,
        chrono::Utc::now(),
        &AppConfig::get().booking,
    ) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BookingInvalid, msg)));
    }

    let new_booking = NewBooking {
        student_id: student.id,
        tutor_id: course.tutor_id,
        course_id: course.id,
        scheduled_at: booking_data.scheduled_at,
        duration_minutes,
        note: booking_data
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
    };

    match storage.create_booking(new_booking).await {
        Ok(booking) => {
            notifications::notify(
                &storage,
                booking.tutor_id,
                NotificationKind::BookingCreated,
                "New booking request",
                format!(
                    "{} requested \"{}\" on {}",
                    student.display_name(),
                    course.title,
                    booking.scheduled_at.format("%Y-%m-%d %H:%M UTC")
                ),
            )
            .await;
            activities::record(
                &storage,
                student.id,
                ActivityAction::BookingCreated,
                format!("Booked \"{}\" ({})", course.title, booking.reference),
            )
            .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(booking, "Booking created successfully")))
        }
        // 课程在校验后被删除
        Err(e) if e.is_not_found() => Ok(crate::services::courses::course_not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::BookingCreationFailed,
            format!("Booking creation failed: {e}"),
        )),
    }
}
