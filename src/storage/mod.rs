use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段为已哈希的密码）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户总数
    async fn count_users(&self) -> Result<u64>;
    // 按角色统计用户
    async fn count_users_by_role(&self, role: UserRole) -> Result<i64>;

    /// 课程管理方法
    // 创建课程（tutor_id 由服务层确定）
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest)
    -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    // 统计课程数量，可按导师筛选
    /// `published_only` 为 true 时不计草稿
    async fn count_courses(&self, tutor_id: Option<i64>, published_only: bool) -> Result<i64>;

    /// 预约管理方法
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking>;
    async fn get_booking_by_id(&self, id: i64) -> Result<Option<Booking>>;
    async fn list_bookings_with_pagination(
        &self,
        query: BookingListQuery,
    ) -> Result<BookingListResponse>;
    async fn update_booking(
        &self,
        id: i64,
        update: UpdateBookingRequest,
    ) -> Result<Option<Booking>>;
    // 只修改状态，状态机校验在服务层
    async fn update_booking_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<Option<Booking>>;
    async fn delete_booking(&self, id: i64) -> Result<bool>;
    async fn count_bookings(&self, query: BookingCountQuery) -> Result<i64>;
    // 学生在某课程下是否有指定状态之一的预约
    async fn has_booking_for_course(
        &self,
        student_id: i64,
        course_id: i64,
        statuses: &[BookingStatus],
    ) -> Result<bool>;
    // 与导师有过预约的学生 ID（去重）
    async fn list_tutor_student_ids(&self, tutor_id: i64) -> Result<Vec<i64>>;

    /// 评价管理方法
    async fn create_review(
        &self,
        course_id: i64,
        student_id: i64,
        review: CreateReviewRequest,
    ) -> Result<Review>;
    async fn get_review_by_id(&self, id: i64) -> Result<Option<Review>>;
    async fn get_review_by_course_and_student(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Review>>;
    async fn list_course_reviews(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
    ) -> Result<ReviewListResponse>;
    async fn delete_review(&self, id: i64) -> Result<bool>;
    async fn get_course_rating_summary(&self, course_id: i64) -> Result<RatingSummary>;
    // 导师名下所有课程的评分汇总
    async fn get_tutor_rating_summary(&self, tutor_id: i64) -> Result<RatingSummary>;

    /// 课程资料方法
    // 资料查询均限定在 course_id 下，ID 属于其他课程时视为不存在
    async fn create_assignment(
        &self,
        course_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn get_assignment(&self, course_id: i64, id: i64) -> Result<Option<Assignment>>;
    async fn list_assignments(&self, course_id: i64) -> Result<Vec<Assignment>>;
    async fn update_assignment(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    async fn delete_assignment(&self, course_id: i64, id: i64) -> Result<bool>;

    async fn create_content(&self, course_id: i64, req: CreateContentRequest) -> Result<Content>;
    async fn get_content(&self, course_id: i64, id: i64) -> Result<Option<Content>>;
    async fn list_contents(&self, course_id: i64) -> Result<Vec<Content>>;
    async fn update_content(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateContentRequest,
    ) -> Result<Option<Content>>;
    async fn delete_content(&self, course_id: i64, id: i64) -> Result<bool>;

    async fn create_video(&self, course_id: i64, req: CreateVideoRequest) -> Result<Video>;
    async fn get_video(&self, course_id: i64, id: i64) -> Result<Option<Video>>;
    async fn list_videos(&self, course_id: i64) -> Result<Vec<Video>>;
    async fn update_video(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateVideoRequest,
    ) -> Result<Option<Video>>;
    async fn delete_video(&self, course_id: i64, id: i64) -> Result<bool>;

    /// 通知方法
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification>;
    async fn list_notifications_with_pagination(
        &self,
        user_id: i64,
        unread_only: bool,
        pagination: PaginationQuery,
    ) -> Result<NotificationListResponse>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<i64>;
    // 以下操作都限定在 user_id 名下
    async fn mark_notification_read(&self, user_id: i64, id: i64) -> Result<bool>;
    async fn mark_all_notifications_read(&self, user_id: i64) -> Result<i64>;
    async fn delete_notification(&self, user_id: i64, id: i64) -> Result<bool>;

    /// 用户动态方法
    async fn record_activity(
        &self,
        user_id: i64,
        action: ActivityAction,
        description: &str,
    ) -> Result<Activity>;
    async fn list_activities_with_pagination(
        &self,
        user_id: i64,
        pagination: PaginationQuery,
    ) -> Result<ActivityListResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
