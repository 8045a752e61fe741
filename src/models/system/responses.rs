use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemInfoResponse {
    pub name: String,                            // 系统名称
    pub version: String,                         // 程序版本
    pub environment: String,                     // 运行环境
    pub started_at: chrono::DateTime<chrono::Utc>, // 启动时间
    pub uptime_seconds: i64,                     // 运行时长
}
