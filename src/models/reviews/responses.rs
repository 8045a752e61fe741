use super::entities::{RatingSummary, Review};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct ReviewListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Review>,
    pub summary: RatingSummary,
}
