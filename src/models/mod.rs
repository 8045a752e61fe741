//! 数据模型定义
//!
//! 每个资源分为 `entities`（业务实体）、`requests`（请求体/查询参数）
//! 和 `responses`（响应体）三部分。

pub mod activities;
pub mod auth;
pub mod bookings;
pub mod common;
pub mod courses;
pub mod dashboard;
pub mod materials;
pub mod notifications;
pub mod reviews;
pub mod system;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 表示成功；其余按资源分段：1xxx 通用，2xxx 认证，3xxx 用户，
/// 4xxx 课程，5xxx 预约，6xxx 评价，7xxx 课程资料，8xxx 通知。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    RateLimitExceeded = 1004,
    InternalServerError = 1005,

    // 认证
    AuthFailed = 2000,
    RegisterFailed = 2001,
    RoleNotAllowed = 2002,
    AccountInactive = 2003,

    // 用户
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserPasswordInvalid = 3004,
    UserNameAlreadyExists = 3005,
    UserEmailAlreadyExists = 3006,
    UserCreationFailed = 3007,
    UserUpdateFailed = 3008,
    UserDeleteFailed = 3009,
    CanNotDeleteCurrentUser = 3010,
    CanNotDemoteCurrentUser = 3011,

    // 课程
    CourseNotFound = 4000,
    CourseInvalid = 4001,
    CoursePermissionDenied = 4002,
    CourseCreationFailed = 4003,
    CourseUpdateFailed = 4004,
    CourseDeleteFailed = 4005,

    // 预约
    BookingNotFound = 5000,
    BookingInvalid = 5001,
    BookingPermissionDenied = 5002,
    BookingStatusTransitionInvalid = 5003,
    BookingCreationFailed = 5004,
    BookingUpdateFailed = 5005,

    // 评价
    ReviewNotFound = 6000,
    ReviewInvalid = 6001,
    ReviewAlreadyExists = 6002,
    ReviewNotEligible = 6003,
    ReviewPermissionDenied = 6004,

    // 课程资料
    MaterialNotFound = 7000,
    MaterialInvalid = 7001,
    MaterialPermissionDenied = 7002,

    // 通知
    NotificationNotFound = 8000,
}
