use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct StudentDashboard {
    pub total_bookings: i64,
    pub upcoming_bookings: i64,
    pub completed_bookings: i64,
    pub unread_notifications: i64,
}

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct TutorDashboard {
    pub course_count: i64,
    pub pending_bookings: i64,
    pub upcoming_bookings: i64,
    pub student_count: i64,
    pub average_rating: Option<f64>,
    pub unread_notifications: i64,
}

#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct AdminDashboard {
    pub student_count: i64,
    pub tutor_count: i64,
    pub admin_count: i64,
    pub course_count: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
}

// 按角色返回不同的仪表盘卡片
#[derive(Debug, Serialize, TS)]
#[serde(tag = "role", content = "cards", rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub enum DashboardResponse {
    Student(StudentDashboard),
    Tutor(TutorDashboard),
    Admin(AdminDashboard),
}
