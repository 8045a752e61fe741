pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::courses::entities::Course;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;
use crate::utils::validate::validate_title;

pub const MAX_TITLE_LEN: usize = 200;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 课程列表
    pub async fn list_courses(
        &self,
        query: CourseQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, query, request).await
    }

    // 创建课程
    pub async fn create_course(
        &self,
        course_data: CreateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_course(self, course_data, request).await
    }

    // 课程详情
    pub async fn get_course(&self, course_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_course(self, course_id, request).await
    }

    // 更新课程
    pub async fn update_course(
        &self,
        course_id: i64,
        update_data: UpdateCourseRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_course(self, course_id, update_data, request).await
    }

    // 删除课程
    pub async fn delete_course(
        &self,
        course_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_course(self, course_id, request).await
    }
}

/// 所属导师或管理员可以管理课程
pub(crate) fn can_manage(user: &User, course: &Course) -> bool {
    user.is_admin() || course.tutor_id == user.id
}

/// 未发布课程只对所属导师和管理员可见
pub(crate) fn can_view(user: Option<&User>, course: &Course) -> bool {
    course.is_published || user.is_some_and(|u| can_manage(u, course))
}

/// 按 ID 加载课程，不存在时返回 404 响应
pub(crate) async fn load_course(
    storage: &Arc<dyn Storage>,
    course_id: i64,
) -> Result<Course, HttpResponse> {
    match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => Ok(course),
        Ok(None) => Err(course_not_found()),
        Err(e) => Err(super::internal_error(
            ErrorCode::InternalServerError,
            format!("Failed to get course information: {e}"),
        )),
    }
}

pub(crate) fn course_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::CourseNotFound,
        "Course not found",
    ))
}

pub(crate) fn course_forbidden() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::CoursePermissionDenied,
        "You do not have permission to manage this course",
    ))
}

/// 课程字段校验
pub(crate) fn validate_course_fields(
    title: Option<&str>,
    price: Option<f64>,
    duration_minutes: Option<i32>,
) -> Result<(), String> {
    if let Some(title) = title {
        validate_title(title, MAX_TITLE_LEN)?;
    }
    if let Some(price) = price
        && (!price.is_finite() || price < 0.0)
    {
        return Err("Price must be a non-negative number".to_string());
    }
    if let Some(duration) = duration_minutes
        && duration <= 0
    {
        return Err("Duration must be greater than 0 minutes".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserProfile, UserRole, UserStatus};
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

    fn course(tutor_id: i64, is_published: bool) -> Course {
        Course {
            id: 1,
            tutor_id,
            title: "Algebra".to_string(),
            description: None,
            subject: Some("math".to_string()),
            price: 30.0,
            duration_minutes: 60,
            is_published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_and_admin_can_manage() {
        let c = course(2, true);
        assert!(can_manage(&user(2, UserRole::Tutor), &c));
        assert!(can_manage(&user(9, UserRole::Admin), &c));
        assert!(!can_manage(&user(3, UserRole::Tutor), &c));
        assert!(!can_manage(&user(4, UserRole::Student), &c));
    }

    #[test]
    fn test_unpublished_visibility() {
        let draft = course(2, false);
        assert!(!can_view(None, &draft));
        assert!(!can_view(Some(&user(5, UserRole::Student)), &draft));
        assert!(can_view(Some(&user(2, UserRole::Tutor)), &draft));
        assert!(can_view(Some(&user(1, UserRole::Admin)), &draft));
        assert!(can_view(None, &course(2, true)));
    }

    #[test]
    fn test_course_field_validation() {
        assert!(validate_course_fields(Some("Calculus"), Some(0.0), Some(45)).is_ok());
        assert!(validate_course_fields(Some("  "), None, None).is_err());
        assert!(validate_course_fields(None, Some(-1.0), None).is_err());
        assert!(validate_course_fields(None, Some(f64::NAN), None).is_err());
        assert!(validate_course_fields(None, None, Some(0)).is_err());
        assert!(validate_course_fields(None, None, None).is_ok());
    }
}
