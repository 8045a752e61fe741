use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通知类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationKind {
    BookingCreated,
    BookingUpdated,
    ReviewCreated,
    System,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::BookingCreated => write!(f, "booking_created"),
            NotificationKind::BookingUpdated => write!(f, "booking_updated"),
            NotificationKind::ReviewCreated => write!(f, "review_created"),
            NotificationKind::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking_created" => Ok(NotificationKind::BookingCreated),
            "booking_updated" => Ok(NotificationKind::BookingUpdated),
            "review_created" => Ok(NotificationKind::ReviewCreated),
            "system" => Ok(NotificationKind::System),
            _ => Err(format!("Invalid notification kind: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
