use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{ReviewService, validate_review};
use crate::models::{
    ApiResponse, ErrorCode,
    activities::entities::ActivityAction,
    bookings::entities::BookingStatus,
    notifications::entities::NotificationKind,
    reviews::requests::CreateReviewRequest,
    users::entities::UserRole,
};
use crate::services::courses::load_course;
use crate::services::{activities, current_user, internal_error, notifications};

fn already_reviewed() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::ReviewAlreadyExists,
        "You have already reviewed this course",
    ))
}

pub async fn create_review(
    service: &ReviewService,
    course_id: i64,
    mut review_data: CreateReviewRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let student = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    if student.role != UserRole::Student {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::ReviewPermissionDenied,
            "Only students can review courses",
        )));
    }

    if let Err(msg) = validate_review(&review_data) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::ReviewInvalid, msg)));
    }
    review_data.comment = review_data
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let storage = service.get_storage(request)?;

    let course = match load_course(&storage, course_id).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    // 必须上过这门课
    match storage
        .has_booking_for_course(student.id, course_id, &[BookingStatus::Completed])
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::ReviewNotEligible,
                "A completed session is required before reviewing this course",
            )));
        }
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to check review eligibility: {e}"),
            ));
        }
    }

    match storage
        .get_review_by_course_and_student(course_id, student.id)
        .await
    {
        Ok(Some(_)) => return Ok(already_reviewed()),
        Ok(None) => {}
        Err(e) => {
            return Ok(internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to check existing review: {e}"),
            ));
        }
    }

    match storage.create_review(course_id, student.id, review_data).await {
        Ok(review) => {
            notifications::notify(
                &storage,
                course.tutor_id,
                NotificationKind::ReviewCreated,
                "New review",
                format!(
                    "{} rated \"{}\" {}/5",
                    student.display_name(),
                    course.title,
                    review.rating
                ),
            )
            .await;
            activities::record(
                &storage,
                student.id,
                ActivityAction::ReviewCreated,
                format!("Reviewed \"{}\"", course.title),
            )
            .await;
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(review, "Review created successfully")))
        }
        Err(e) if e.is_unique_violation() => Ok(already_reviewed()),
        Err(e) if e.is_not_found() => Ok(crate::services::courses::course_not_found()),
        Err(e) => Ok(internal_error(
            ErrorCode::InternalServerError,
            format!("Review creation failed: {e}"),
        )),
    }
}
