use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 授课导师ID
    pub tutor_id: i64,
    // 课程标题
    pub title: String,
    // 课程描述
    pub description: Option<String>,
    // 学科
    pub subject: Option<String>,
    // 单次课时价格
    pub price: f64,
    // 单次课时时长（分钟）
    pub duration_minutes: i32,
    // 是否对外公开
    pub is_published: bool,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
