use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 预约状态
//
// pending → confirmed | cancelled
// confirmed → completed | cancelled
// completed、cancelled 为终态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// 发起状态变更的一方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingActor {
    Student,
    Tutor,
    Admin,
}

impl BookingActor {
    /// 根据用户在该预约中的身份确定操作方；与预约无关的非管理员返回 None
    pub fn resolve(user_id: i64, role: UserRole, booking: &Booking) -> Option<Self> {
        if role == UserRole::Admin {
            Some(BookingActor::Admin)
        } else if booking.tutor_id == user_id {
            Some(BookingActor::Tutor)
        } else if booking.student_id == user_id {
            Some(BookingActor::Student)
        } else {
            None
        }
    }
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// 状态机是否允许 self → next
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (BookingStatus::Pending, BookingStatus::Confirmed)
                | (BookingStatus::Confirmed, BookingStatus::Completed)
                | (_, BookingStatus::Cancelled)
        )
    }

    /// 操作方是否有权执行 self → next（前提是状态机允许）
    pub fn actor_may_transition(&self, next: BookingStatus, actor: BookingActor) -> bool {
        if !self.can_transition_to(next) {
            return false;
        }
        match actor {
            BookingActor::Admin | BookingActor::Tutor => true,
            BookingActor::Student => next == BookingStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {s}")),
        }
    }
}

// 预约（课时）实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct Booking {
    pub id: i64,
    /// 对外展示的预约编号
    pub reference: String,
    pub student_id: i64,
    pub tutor_id: i64,
    pub course_id: i64,
    pub status: BookingStatus,
    pub scheduled_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Booking {
    pub fn is_participant(&self, user_id: i64) -> bool {
        self.student_id == user_id || self.tutor_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn booking(student_id: i64, tutor_id: i64) -> Booking {
        Booking {
            id: 1,
            reference: "ref".to_string(),
            student_id,
            tutor_id,
            course_id: 9,
            status: BookingStatus::Pending,
            scheduled_at: Utc::now(),
            duration_minutes: 60,
            note: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_legal_transitions() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn test_illegal_transitions() {
        use BookingStatus::*;
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Pending));
        for terminal in [Completed, Cancelled] {
            assert!(terminal.is_terminal());
            for next in [Pending, Confirmed, Completed, Cancelled] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_student_may_only_cancel() {
        use BookingStatus::*;
        assert!(Pending.actor_may_transition(Cancelled, BookingActor::Student));
        assert!(Confirmed.actor_may_transition(Cancelled, BookingActor::Student));
        assert!(!Pending.actor_may_transition(Confirmed, BookingActor::Student));
        assert!(!Confirmed.actor_may_transition(Completed, BookingActor::Student));
    }

    #[test]
    fn test_tutor_and_admin_follow_state_machine() {
        use BookingStatus::*;
        for actor in [BookingActor::Tutor, BookingActor::Admin] {
            assert!(Pending.actor_may_transition(Confirmed, actor));
            assert!(Confirmed.actor_may_transition(Completed, actor));
            assert!(!Cancelled.actor_may_transition(Confirmed, actor));
        }
    }

    #[test]
    fn test_actor_resolution() {
        let b = booking(10, 20);
        assert_eq!(
            BookingActor::resolve(10, UserRole::Student, &b),
            Some(BookingActor::Student)
        );
        assert_eq!(
            BookingActor::resolve(20, UserRole::Tutor, &b),
            Some(BookingActor::Tutor)
        );
        assert_eq!(
            BookingActor::resolve(99, UserRole::Admin, &b),
            Some(BookingActor::Admin)
        );
        assert_eq!(BookingActor::resolve(30, UserRole::Tutor, &b), None);
        assert!(b.is_participant(10));
        assert!(!b.is_participant(30));
    }

    #[test]
    fn test_status_parse_accepts_us_spelling() {
        assert_eq!(
            "Canceled".parse::<BookingStatus>().unwrap(),
            BookingStatus::Cancelled
        );
        assert!("unknown".parse::<BookingStatus>().is_err());
    }
}
