use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct Review {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    /// 1..=5
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 评分统计
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/review.ts")]
pub struct RatingSummary {
    pub review_count: i64,
    pub average_rating: Option<f64>,
}

impl RatingSummary {
    pub fn from_ratings(ratings: &[i32]) -> Self {
        if ratings.is_empty() {
            return Self {
                review_count: 0,
                average_rating: None,
            };
        }
        let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
        let avg = sum as f64 / ratings.len() as f64;
        Self {
            review_count: ratings.len() as i64,
            // 保留两位小数
            average_rating: Some((avg * 100.0).round() / 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let s = RatingSummary::from_ratings(&[]);
        assert_eq!(s.review_count, 0);
        assert_eq!(s.average_rating, None);
    }

    #[test]
    fn test_average_is_rounded() {
        let s = RatingSummary::from_ratings(&[5, 4, 4]);
        assert_eq!(s.review_count, 3);
        assert_eq!(s.average_rating, Some(4.33));
    }
}
