use super::entities::BookingStatus;
use crate::models::common::{PaginationQuery, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

// 预约列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct BookingQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<BookingStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub course_id: Option<i64>,
}

// 学生创建预约
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct CreateBookingRequest {
    pub course_id: i64,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    /// 不填写则使用课程默认时长
    pub duration_minutes: Option<i32>,
    pub note: Option<String>,
}

// 学生在待确认阶段修改预约
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct UpdateBookingRequest {
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub duration_minutes: Option<i32>,
    pub note: Option<String>,
}

// 变更预约状态
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

// 存储层插入参数，tutor_id 与时长由服务层根据课程确定
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub student_id: i64,
    pub tutor_id: i64,
    pub course_id: i64,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub note: Option<String>,
}

// 预约列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct BookingListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub tutor_id: Option<i64>,
    pub course_id: Option<i64>,
    pub status: Option<BookingStatus>,
}

// 预约计数条件（仪表盘统计）
#[derive(Debug, Clone, Default)]
pub struct BookingCountQuery {
    pub student_id: Option<i64>,
    pub tutor_id: Option<i64>,
    /// 为空表示不限状态
    pub statuses: Vec<BookingStatus>,
    pub scheduled_after: Option<chrono::DateTime<chrono::Utc>>,
}
