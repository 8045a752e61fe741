//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod activities;
mod bookings;
mod courses;
mod materials;
mod notifications;
mod reviews;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, TutorHubError};
use crate::models::PaginationInfo;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化，开启外键约束）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TutorHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TutorHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TutorHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    pub(crate) fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TutorHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 分页器结果统一转换为响应中的分页信息
pub(crate) fn pagination_info(page: u64, size: u64, total: u64) -> PaginationInfo {
    let total_pages = if total == 0 { 0 } else { total.div_ceil(size) };
    PaginationInfo::new(page, size, total, total_pages)
}

/// 插入失败：引用的父记录已不存在（外键约束）时转为 NotFound
pub(crate) fn map_insert_error(action: &str, e: sea_orm::DbErr) -> TutorHubError {
    let err = TutorHubError::database_operation(format!("{action}: {e}"));
    if err.is_foreign_key_violation() {
        TutorHubError::not_found(format!("{action}: referenced record does not exist"))
    } else {
        err
    }
}

/// 可选文本列：去掉首尾空白，空串存为 NULL
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// Storage trait 实现
use crate::models::{
    PaginationQuery,
    activities::{
        entities::{Activity, ActivityAction},
        responses::ActivityListResponse,
    },
    bookings::{
        entities::{Booking, BookingStatus},
        requests::{BookingCountQuery, BookingListQuery, NewBooking, UpdateBookingRequest},
        responses::BookingListResponse,
    },
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    materials::{
        entities::{Assignment, Content, Video},
        requests::{
            CreateAssignmentRequest, CreateContentRequest, CreateVideoRequest,
            UpdateAssignmentRequest, UpdateContentRequest, UpdateVideoRequest,
        },
    },
    notifications::{
        entities::Notification, requests::NewNotification, responses::NotificationListResponse,
    },
    reviews::{
        entities::{RatingSummary, Review},
        requests::CreateReviewRequest,
        responses::ReviewListResponse,
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn count_users_by_role(&self, role: UserRole) -> Result<i64> {
        self.count_users_by_role_impl(role).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn count_courses(&self, tutor_id: Option<i64>, published_only: bool) -> Result<i64> {
        self.count_courses_impl(tutor_id, published_only).await
    }

    // 预约模块
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        self.create_booking_impl(booking).await
    }

    async fn get_booking_by_id(&self, id: i64) -> Result<Option<Booking>> {
        self.get_booking_by_id_impl(id).await
    }

    async fn list_bookings_with_pagination(
        &self,
        query: BookingListQuery,
    ) -> Result<BookingListResponse> {
        self.list_bookings_with_pagination_impl(query).await
    }

    async fn update_booking(
        &self,
        id: i64,
        update: UpdateBookingRequest,
    ) -> Result<Option<Booking>> {
        self.update_booking_impl(id, update).await
    }

    async fn update_booking_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        self.update_booking_status_impl(id, status).await
    }

    async fn delete_booking(&self, id: i64) -> Result<bool> {
        self.delete_booking_impl(id).await
    }

    async fn count_bookings(&self, query: BookingCountQuery) -> Result<i64> {
        self.count_bookings_impl(query).await
    }

    async fn has_booking_for_course(
        &self,
        student_id: i64,
        course_id: i64,
        statuses: &[BookingStatus],
    ) -> Result<bool> {
        self.has_booking_for_course_impl(student_id, course_id, statuses)
            .await
    }

    async fn list_tutor_student_ids(&self, tutor_id: i64) -> Result<Vec<i64>> {
        self.list_tutor_student_ids_impl(tutor_id).await
    }

    // 评价模块
    async fn create_review(
        &self,
        course_id: i64,
        student_id: i64,
        review: CreateReviewRequest,
    ) -> Result<Review> {
        self.create_review_impl(course_id, student_id, review).await
    }

    async fn get_review_by_id(&self, id: i64) -> Result<Option<Review>> {
        self.get_review_by_id_impl(id).await
    }

    async fn get_review_by_course_and_student(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Review>> {
        self.get_review_by_course_and_student_impl(course_id, student_id)
            .await
    }

    async fn list_course_reviews(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
    ) -> Result<ReviewListResponse> {
        self.list_course_reviews_impl(course_id, pagination).await
    }

    async fn delete_review(&self, id: i64) -> Result<bool> {
        self.delete_review_impl(id).await
    }

    async fn get_course_rating_summary(&self, course_id: i64) -> Result<RatingSummary> {
        self.get_course_rating_summary_impl(course_id).await
    }

    async fn get_tutor_rating_summary(&self, tutor_id: i64) -> Result<RatingSummary> {
        self.get_tutor_rating_summary_impl(tutor_id).await
    }

    // 课程资料模块
    async fn create_assignment(
        &self,
        course_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(course_id, req).await
    }

    async fn get_assignment(&self, course_id: i64, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(course_id, id).await
    }

    async fn list_assignments(&self, course_id: i64) -> Result<Vec<Assignment>> {
        self.list_assignments_impl(course_id).await
    }

    async fn update_assignment(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(course_id, id, update).await
    }

    async fn delete_assignment(&self, course_id: i64, id: i64) -> Result<bool> {
        self.delete_assignment_impl(course_id, id).await
    }

    async fn create_content(&self, course_id: i64, req: CreateContentRequest) -> Result<Content> {
        self.create_content_impl(course_id, req).await
    }

    async fn get_content(&self, course_id: i64, id: i64) -> Result<Option<Content>> {
        self.get_content_impl(course_id, id).await
    }

    async fn list_contents(&self, course_id: i64) -> Result<Vec<Content>> {
        self.list_contents_impl(course_id).await
    }

    async fn update_content(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateContentRequest,
    ) -> Result<Option<Content>> {
        self.update_content_impl(course_id, id, update).await
    }

    async fn delete_content(&self, course_id: i64, id: i64) -> Result<bool> {
        self.delete_content_impl(course_id, id).await
    }

    async fn create_video(&self, course_id: i64, req: CreateVideoRequest) -> Result<Video> {
        self.create_video_impl(course_id, req).await
    }

    async fn get_video(&self, course_id: i64, id: i64) -> Result<Option<Video>> {
        self.get_video_impl(course_id, id).await
    }

    async fn list_videos(&self, course_id: i64) -> Result<Vec<Video>> {
        self.list_videos_impl(course_id).await
    }

    async fn update_video(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateVideoRequest,
    ) -> Result<Option<Video>> {
        self.update_video_impl(course_id, id, update).await
    }

    async fn delete_video(&self, course_id: i64, id: i64) -> Result<bool> {
        self.delete_video_impl(course_id, id).await
    }

    // 通知模块
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        self.create_notification_impl(notification).await
    }

    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        unread_only: bool,
        pagination: PaginationQuery,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(user_id, unread_only, pagination)
            .await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64> {
        self.count_unread_notifications_impl(user_id).await
    }

    async fn mark_notification_read(&self, user_id: i64, id: i64) -> Result<bool> {
        self.mark_notification_read_impl(user_id, id).await
    }

    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64> {
        self.mark_all_notifications_read_impl(user_id).await
    }

    async fn delete_notification(&self, user_id: i64, id: i64) -> Result<bool> {
        self.delete_notification_impl(user_id, id).await
    }

    // 动态模块
    async fn record_activity(
        &self,
        user_id: i64,
        action: ActivityAction,
        description: &str,
    ) -> Result<Activity> {
        self.record_activity_impl(user_id, action, description)
            .await
    }

    async fn list_activities_with_pagination(
        &self,
        user_id: i64,
        pagination: PaginationQuery,
    ) -> Result<ActivityListResponse> {
        self.list_activities_with_pagination_impl(user_id, pagination)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("tutorhub.db").unwrap(),
            "sqlite://tutorhub.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/db").unwrap(),
            "postgres://u:p@localhost/db"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }

    #[test]
    fn test_pagination_info() {
        let info = pagination_info(2, 10, 21);
        assert_eq!(info.total_pages, 3);
        assert_eq!(pagination_info(1, 10, 0).total_pages, 0);
    }
}
