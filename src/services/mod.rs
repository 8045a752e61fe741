pub mod activities;
pub mod auth;
pub mod bookings;
pub mod courses;
pub mod dashboard;
pub mod materials;
pub mod navigation;
pub mod notifications;
pub mod reviews;
pub mod students;
pub mod system;
pub mod tutors;
pub mod users;

pub use activities::ActivityService;
pub use auth::AuthService;
pub use bookings::BookingService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use materials::MaterialService;
pub use notifications::NotificationService;
pub use reviews::ReviewService;
pub use students::StudentService;
pub use system::SystemService;
pub use tutors::TutorService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};
use crate::storage::Storage;

/// 从 app_data 中获取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|storage| storage.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("Storage not configured")
        })
}

/// 当前登录用户；缺失时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

pub(crate) fn internal_error(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    let message = message.into();
    tracing::error!("{}", message);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(code, message))
}
