//! 课程评价存储操作

use super::{SeaOrmStorage, map_insert_error, pagination_info};
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::reviews::{ActiveModel, Column, Entity as Reviews};
use crate::errors::{Result, TutorHubError};
use crate::models::{
    PaginationQuery,
    reviews::{
        entities::{RatingSummary, Review},
        requests::CreateReviewRequest,
        responses::ReviewListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建评价，同一学生对同一课程只能评价一次
    pub async fn create_review_impl(
        &self,
        course_id: i64,
        student_id: i64,
        req: CreateReviewRequest,
    ) -> Result<Review> {
        let model = ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            rating: Set(req.rating),
            comment: Set(req.comment),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            let err = map_insert_error("创建评价失败", e);
            if err.is_unique_violation() {
                TutorHubError::conflict("Review already exists for this course")
            } else {
                err
            }
        })?;

        Ok(result.into_review())
    }

    pub async fn get_review_by_id_impl(&self, id: i64) -> Result<Option<Review>> {
        let result = Reviews::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询评价失败: {e}")))?;

        Ok(result.map(|m| m.into_review()))
    }

    pub async fn get_review_by_course_and_student_impl(
        &self,
        course_id: i64,
        student_id: i64,
    ) -> Result<Option<Review>> {
        let result = Reviews::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询评价失败: {e}")))?;

        Ok(result.map(|m| m.into_review()))
    }

    /// 分页列出课程评价，附带评分汇总
    pub async fn list_course_reviews_impl(
        &self,
        course_id: i64,
        pagination: PaginationQuery,
    ) -> Result<ReviewListResponse> {
        let (page, size) = pagination.normalized();

        let paginator = Reviews::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询评价总数失败: {e}")))?;

        let reviews = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询评价列表失败: {e}")))?;

        let summary = self.get_course_rating_summary_impl(course_id).await?;

        Ok(ReviewListResponse {
            pagination: pagination_info(page, size, total),
            items: reviews.into_iter().map(|m| m.into_review()).collect(),
            summary,
        })
    }

    pub async fn delete_review_impl(&self, id: i64) -> Result<bool> {
        let result = Reviews::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("删除评价失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 单个课程的评分汇总
    pub async fn get_course_rating_summary_impl(&self, course_id: i64) -> Result<RatingSummary> {
        let ratings = Reviews::find()
            .select_only()
            .column(Column::Rating)
            .filter(Column::CourseId.eq(course_id))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("统计课程评分失败: {e}")))?;

        Ok(RatingSummary::from_ratings(&ratings))
    }

    /// 导师所有课程的评分汇总
    pub async fn get_tutor_rating_summary_impl(&self, tutor_id: i64) -> Result<RatingSummary> {
        let ratings = Reviews::find()
            .select_only()
            .column(Column::Rating)
            .inner_join(Courses)
            .filter(CourseColumn::TutorId.eq(tutor_id))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("统计导师评分失败: {e}")))?;

        Ok(RatingSummary::from_ratings(&ratings))
    }
}
