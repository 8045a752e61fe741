use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 动态类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub enum ActivityAction {
    Login,
    Register,
    CourseCreated,
    CourseUpdated,
    CourseDeleted,
    BookingCreated,
    BookingStatusChanged,
    ReviewCreated,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Login => "login",
            ActivityAction::Register => "register",
            ActivityAction::CourseCreated => "course_created",
            ActivityAction::CourseUpdated => "course_updated",
            ActivityAction::CourseDeleted => "course_deleted",
            ActivityAction::BookingCreated => "booking_created",
            ActivityAction::BookingStatusChanged => "booking_status_changed",
            ActivityAction::ReviewCreated => "review_created",
        }
    }
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ActivityAction::Login,
            ActivityAction::Register,
            ActivityAction::CourseCreated,
            ActivityAction::CourseUpdated,
            ActivityAction::CourseDeleted,
            ActivityAction::BookingCreated,
            ActivityAction::BookingStatusChanged,
            ActivityAction::ReviewCreated,
        ]
        .into_iter()
        .find(|a| a.as_str() == s)
        .ok_or_else(|| format!("Invalid activity action: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/activity.ts")]
pub struct Activity {
    pub id: i64,
    pub user_id: i64,
    pub action: ActivityAction,
    pub description: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
