//! 课程资料服务
//!
//! 读取：课程导师、管理员、或持有该课程未取消预约的学生。
//! 写入：课程导师或管理员。资料 ID 不属于该课程时返回 404。

pub mod assignments;
pub mod contents;
pub mod videos;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::TutorHubError;
use crate::models::bookings::entities::BookingStatus;
use crate::models::courses::entities::Course;
use crate::models::materials::entities::MaterialKind;
use crate::models::materials::requests::{
    CreateAssignmentRequest, CreateContentRequest, CreateVideoRequest, UpdateAssignmentRequest,
    UpdateContentRequest, UpdateVideoRequest,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::courses::{can_manage, load_course};
use crate::storage::Storage;

pub const MAX_TITLE_LEN: usize = 200;

/// 学生可访问资料的预约状态
const ACTIVE_BOOKING_STATUSES: &[BookingStatus] = &[
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::Completed,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialAccess {
    Read,
    Write,
}

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 作业
    pub async fn list_assignments(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::list(self, course_id, request).await
    }

    pub async fn get_assignment(
        &self,
        course_id: i64,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::get(self, course_id, id, request).await
    }

    pub async fn create_assignment(
        &self,
        course_id: i64,
        data: CreateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::create(self, course_id, data, request).await
    }

    pub async fn update_assignment(
        &self,
        course_id: i64,
        id: i64,
        data: UpdateAssignmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::update(self, course_id, id, data, request).await
    }

    pub async fn delete_assignment(
        &self,
        course_id: i64,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::delete(self, course_id, id, request).await
    }

    // 图文内容
    pub async fn list_contents(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        contents::list(self, course_id, request).await
    }

    pub async fn get_content(
        &self,
        course_id: i64,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        contents::get(self, course_id, id, request).await
    }

    pub async fn create_content(
        &self,
        course_id: i64,
        data: CreateContentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        contents::create(self, course_id, data, request).await
    }

    pub async fn update_content(
        &self,
        course_id: i64,
        id: i64,
        data: UpdateContentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        contents::update(self, course_id, id, data, request).await
    }

    pub async fn delete_content(
        &self,
        course_id: i64,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        contents::delete(self, course_id, id, request).await
    }

    // 视频
    pub async fn list_videos(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        videos::list(self, course_id, request).await
    }

    pub async fn get_video(
        &self,
        course_id: i64,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        videos::get(self, course_id, id, request).await
    }

    pub async fn create_video(
        &self,
        course_id: i64,
        data: CreateVideoRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        videos::create(self, course_id, data, request).await
    }

    pub async fn update_video(
        &self,
        course_id: i64,
        id: i64,
        data: UpdateVideoRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        videos::update(self, course_id, id, data, request).await
    }

    pub async fn delete_video(
        &self,
        course_id: i64,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        videos::delete(self, course_id, id, request).await
    }
}

/// 不查库即可确定的访问结论；学生需要再查预约
fn static_access(user: &User, course: &Course, wanted: MaterialAccess) -> Option<bool> {
    if can_manage(user, course) {
        return Some(true);
    }
    match (wanted, user.role) {
        (MaterialAccess::Read, UserRole::Student) => None,
        _ => Some(false),
    }
}

/// 校验当前用户对课程资料的访问权限，通过时返回存储实例
pub(crate) async fn authorize(
    service: &MaterialService,
    request: &HttpRequest,
    course_id: i64,
    wanted: MaterialAccess,
) -> Result<Arc<dyn Storage>, HttpResponse> {
    let user = super::current_user(request)?;
    let storage = service
        .get_storage(request)
        .map_err(|e| super::internal_error(ErrorCode::InternalServerError, e.to_string()))?;
    let course = load_course(&storage, course_id).await?;

    let allowed = match static_access(&user, &course, wanted) {
        Some(allowed) => allowed,
        None => storage
            .has_booking_for_course(user.id, course_id, ACTIVE_BOOKING_STATUSES)
            .await
            .map_err(|e| {
                super::internal_error(
                    ErrorCode::InternalServerError,
                    format!("Failed to check course enrollment: {e}"),
                )
            })?,
    };

    if !allowed {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::MaterialPermissionDenied,
            "You do not have access to this course's materials",
        )));
    }
    Ok(storage)
}

pub(crate) fn material_not_found(kind: MaterialKind) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::MaterialNotFound,
        format!("{} not found", kind.label()),
    ))
}

pub(crate) fn material_invalid(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::MaterialInvalid, msg))
}

pub(crate) fn storage_failure(kind: MaterialKind, action: &str, e: TutorHubError) -> HttpResponse {
    if e.is_not_found() {
        return crate::services::courses::course_not_found();
    }
    super::internal_error(
        ErrorCode::InternalServerError,
        format!("Failed to {action} {}: {e}", kind.label().to_lowercase()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserProfile, UserStatus};
    use chrono::Utc;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            status: UserStatus::Active,
            profile: UserProfile::default(),
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(tutor_id: i64) -> Course {
        Course {
            id: 3,
            tutor_id,
            title: "Physics".to_string(),
            description: None,
            subject: None,
            price: 10.0,
            duration_minutes: 60,
            is_published: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_course_tutor_and_admin_have_full_access() {
        let c = course(2);
        for wanted in [MaterialAccess::Read, MaterialAccess::Write] {
            assert_eq!(static_access(&user(2, UserRole::Tutor), &c, wanted), Some(true));
            assert_eq!(static_access(&user(1, UserRole::Admin), &c, wanted), Some(true));
        }
    }

    #[test]
    fn test_other_tutor_is_denied() {
        let c = course(2);
        assert_eq!(
            static_access(&user(5, UserRole::Tutor), &c, MaterialAccess::Read),
            Some(false)
        );
    }

    #[test]
    fn test_student_read_depends_on_booking() {
        let c = course(2);
        let s = user(7, UserRole::Student);
        assert_eq!(static_access(&s, &c, MaterialAccess::Read), None);
        assert_eq!(static_access(&s, &c, MaterialAccess::Write), Some(false));
    }

    #[test]
    fn test_cancelled_booking_does_not_grant_access() {
        assert!(!ACTIVE_BOOKING_STATUSES.contains(&BookingStatus::Cancelled));
    }

    #[test]
    fn test_missing_parent_course_maps_to_not_found() {
        let resp = storage_failure(
            MaterialKind::Video,
            "create",
            TutorHubError::not_found("referenced record does not exist"),
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

        let resp = storage_failure(
            MaterialKind::Video,
            "create",
            TutorHubError::database_operation("disk I/O error"),
        );
        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }
}
