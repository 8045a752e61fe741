//! 按角色汇总的仪表盘数据

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::bookings::{entities::BookingStatus, requests::BookingCountQuery};
use crate::models::dashboard::responses::{
    AdminDashboard, DashboardResponse, StudentDashboard, TutorDashboard,
};
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

use super::{current_user, internal_error};

const UPCOMING: &[BookingStatus] = &[BookingStatus::Pending, BookingStatus::Confirmed];

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = match current_user(request) {
            Ok(user) => user,
            Err(resp) => return Ok(resp),
        };
        let storage = self.get_storage(request)?;

        match build_dashboard(&storage, &user).await {
            Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                dashboard,
                "Dashboard retrieved successfully",
            ))),
            Err(e) => Ok(internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to build dashboard: {e}"),
            )),
        }
    }
}

async fn build_dashboard(storage: &Arc<dyn Storage>, user: &User) -> Result<DashboardResponse> {
    match user.role {
        UserRole::Student => student_dashboard(storage, user.id)
            .await
            .map(DashboardResponse::Student),
        UserRole::Tutor => tutor_dashboard(storage, user.id)
            .await
            .map(DashboardResponse::Tutor),
        UserRole::Admin => admin_dashboard(storage).await.map(DashboardResponse::Admin),
    }
}

async fn student_dashboard(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<StudentDashboard> {
    let mine = BookingCountQuery {
        student_id: Some(student_id),
        ..Default::default()
    };

    Ok(StudentDashboard {
        total_bookings: storage.count_bookings(mine.clone()).await?,
        upcoming_bookings: storage
            .count_bookings(BookingCountQuery {
                statuses: UPCOMING.to_vec(),
                scheduled_after: Some(Utc::now()),
                ..mine.clone()
            })
            .await?,
        completed_bookings: storage
            .count_bookings(BookingCountQuery {
                statuses: vec![BookingStatus::Completed],
                ..mine
            })
            .await?,
        unread_notifications: storage.count_unread_notifications(student_id).await?,
    })
}

async fn tutor_dashboard(storage: &Arc<dyn Storage>, tutor_id: i64) -> Result<TutorDashboard> {
    let mine = BookingCountQuery {
        tutor_id: Some(tutor_id),
        ..Default::default()
    };

    let rating = storage.get_tutor_rating_summary(tutor_id).await?;

    Ok(TutorDashboard {
        course_count: storage.count_courses(Some(tutor_id), false).await?,
        pending_bookings: storage
            .count_bookings(BookingCountQuery {
                statuses: vec![BookingStatus::Pending],
                ..mine.clone()
            })
            .await?,
        upcoming_bookings: storage
            .count_bookings(BookingCountQuery {
                statuses: UPCOMING.to_vec(),
                scheduled_after: Some(Utc::now()),
                ..mine
            })
            .await?,
        student_count: storage.list_tutor_student_ids(tutor_id).await?.len() as i64,
        average_rating: rating.average_rating,
        unread_notifications: storage.count_unread_notifications(tutor_id).await?,
    })
}

async fn admin_dashboard(storage: &Arc<dyn Storage>) -> Result<AdminDashboard> {
    let by_status = |status: BookingStatus| BookingCountQuery {
        statuses: vec![status],
        ..Default::default()
    };

    Ok(AdminDashboard {
        student_count: storage.count_users_by_role(UserRole::Student).await?,
        tutor_count: storage.count_users_by_role(UserRole::Tutor).await?,
        admin_count: storage.count_users_by_role(UserRole::Admin).await?,
        course_count: storage.count_courses(None, false).await?,
        pending_bookings: storage.count_bookings(by_status(BookingStatus::Pending)).await?,
        confirmed_bookings: storage
            .count_bookings(by_status(BookingStatus::Confirmed))
            .await?,
        completed_bookings: storage
            .count_bookings(by_status(BookingStatus::Completed))
            .await?,
        cancelled_bookings: storage
            .count_bookings(by_status(BookingStatus::Cancelled))
            .await?,
    })
}
