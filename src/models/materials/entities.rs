use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 课程作业
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Assignment {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程图文内容，按 position 排序
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Content {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub body: String,
    pub position: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 课程视频
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Video {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub url: String,
    pub duration_seconds: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 资料类型，用于日志与错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Assignment,
    Content,
    Video,
}

impl MaterialKind {
    pub fn label(&self) -> &'static str {
        match self {
            MaterialKind::Assignment => "Assignment",
            MaterialKind::Content => "Content",
            MaterialKind::Video => "Video",
        }
    }
}
