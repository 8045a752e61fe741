use crate::models::common::{PaginationQuery, deserialize_optional_i64};
use serde::Deserialize;
use ts_rs::TS;

// 课程查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub tutor_id: Option<i64>,
    pub subject: Option<String>,
    pub search: Option<String>,
}

// 创建课程请求
//
// # tutor_id 字段说明
// - **导师创建**：可选字段，不填写则使用当前登录导师的 ID
// - **管理员创建**：必填字段，且该用户必须是导师角色
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CreateCourseRequest {
    pub tutor_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub subject: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_duration() -> i32 {
    60
}

fn default_published() -> bool {
    true
}

// 更新课程请求
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

// 课程列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub tutor_id: Option<i64>,
    pub subject: Option<String>,
    pub search: Option<String>,
    /// 为 true 时只返回已发布课程（管理员查询时为 false）
    pub published_only: bool,
    /// 只看已发布课程时，仍包含该导师自己的未发布课程
    pub owner_id: Option<i64>,
}
