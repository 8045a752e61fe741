pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::PaginationQuery;
use crate::models::reviews::{
    entities::{MAX_RATING, MIN_RATING},
    requests::CreateReviewRequest,
};
use crate::storage::Storage;

pub const MAX_COMMENT_LEN: usize = 2000;

pub struct ReviewService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReviewService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 课程评价列表
    pub async fn list_reviews(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_reviews(self, course_id, pagination, request).await
    }

    // 发表评价
    pub async fn create_review(
        &self,
        course_id: i64,
        review_data: CreateReviewRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_review(self, course_id, review_data, request).await
    }

    // 删除评价
    pub async fn delete_review(
        &self,
        review_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_review(self, review_id, request).await
    }
}

pub(crate) fn validate_review(review: &CreateReviewRequest) -> Result<(), String> {
    if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
        return Err(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        ));
    }
    if let Some(ref comment) = review.comment
        && comment.chars().count() > MAX_COMMENT_LEN
    {
        return Err(format!(
            "Comment must be at most {MAX_COMMENT_LEN} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i32, comment: Option<&str>) -> CreateReviewRequest {
        CreateReviewRequest {
            rating,
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn test_rating_range() {
        assert!(validate_review(&review(1, None)).is_ok());
        assert!(validate_review(&review(5, Some("Great tutor"))).is_ok());
        assert!(validate_review(&review(0, None)).is_err());
        assert!(validate_review(&review(6, None)).is_err());
    }

    #[test]
    fn test_comment_length() {
        let long = "x".repeat(MAX_COMMENT_LEN + 1);
        assert!(validate_review(&review(4, Some(&long))).is_err());
    }
}
