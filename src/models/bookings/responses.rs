use super::entities::Booking;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 预约列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct BookingListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Booking>,
}
