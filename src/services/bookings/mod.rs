pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod status;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::config::BookingConfig;
use crate::models::bookings::entities::Booking;
use crate::models::bookings::requests::{
    BookingQueryParams, CreateBookingRequest, UpdateBookingRequest, UpdateBookingStatusRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct BookingService {
    storage: Option<Arc<dyn Storage>>,
}

impl BookingService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 创建预约（学生）
    pub async fn create_booking(
        &self,
        booking_data: CreateBookingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_booking(self, booking_data, request).await
    }

    // 预约列表
    pub async fn list_bookings(
        &self,
        query: BookingQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_bookings(self, query, request).await
    }

    // 预约详情
    pub async fn get_booking(
        &self,
        booking_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_booking(self, booking_id, request).await
    }

    // 修改预约（学生，待确认阶段）
    pub async fn update_booking(
        &self,
        booking_id: i64,
        update_data: UpdateBookingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_booking(self, booking_id, update_data, request).await
    }

    // 变更预约状态
    pub async fn update_status(
        &self,
        booking_id: i64,
        status_data: UpdateBookingStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_status(self, booking_id, status_data, request).await
    }

    // 删除预约（管理员）
    pub async fn delete_booking(
        &self,
        booking_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_booking(self, booking_id, request).await
    }
}

/// 校验预约时间与时长
pub(crate) fn validate_schedule(
    scheduled_at: DateTime<Utc>,
    duration_minutes: i32,
    now: DateTime<Utc>,
    config: &BookingConfig,
) -> Result<(), String> {
    let earliest = now + Duration::minutes(config.min_lead_minutes.max(0));
    if scheduled_at <= earliest {
        return Err("Scheduled time must be in the future".to_string());
    }
    if duration_minutes <= 0 {
        return Err("Duration must be greater than 0 minutes".to_string());
    }
    if duration_minutes > config.max_duration_minutes {
        return Err(format!(
            "Duration must be at most {} minutes",
            config.max_duration_minutes
        ));
    }
    Ok(())
}

pub(crate) async fn load_booking(
    storage: &Arc<dyn Storage>,
    booking_id: i64,
) -> Result<Booking, HttpResponse> {
    match storage.get_booking_by_id(booking_id).await {
        Ok(Some(booking)) => Ok(booking),
        Ok(None) => Err(booking_not_found()),
        Err(e) => Err(super::internal_error(
            ErrorCode::InternalServerError,
            format!("Failed to get booking: {e}"),
        )),
    }
}

pub(crate) fn booking_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::BookingNotFound,
        "Booking not found",
    ))
}

pub(crate) fn booking_forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::BookingPermissionDenied,
        message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BookingConfig {
        BookingConfig {
            min_lead_minutes: 30,
            max_duration_minutes: 180,
        }
    }

    #[test]
    fn test_past_or_too_soon_is_rejected() {
        let now = Utc::now();
        assert!(validate_schedule(now - Duration::hours(1), 60, now, &config()).is_err());
        assert!(validate_schedule(now + Duration::minutes(10), 60, now, &config()).is_err());
        assert!(validate_schedule(now + Duration::hours(2), 60, now, &config()).is_ok());
    }

    #[test]
    fn test_duration_bounds() {
        let now = Utc::now();
        let later = now + Duration::days(1);
        assert!(validate_schedule(later, 0, now, &config()).is_err());
        assert!(validate_schedule(later, 181, now, &config()).is_err());
        assert!(validate_schedule(later, 180, now, &config()).is_ok());
    }

    #[test]
    fn test_zero_lead_still_requires_future() {
        let cfg = BookingConfig {
            min_lead_minutes: 0,
            max_duration_minutes: 240,
        };
        let now = Utc::now();
        assert!(validate_schedule(now, 60, now, &cfg).is_err());
        assert!(validate_schedule(now + Duration::seconds(5), 60, now, &cfg).is_ok());
    }
}
