//! 预约存储操作

use super::{SeaOrmStorage, map_insert_error, optional_text, pagination_info};
use crate::entity::bookings::{ActiveModel, Column, Entity as Bookings};
use crate::errors::{Result, TutorHubError};
use crate::models::common::page_bounds;
use crate::models::bookings::{
    entities::{Booking, BookingStatus},
    requests::{BookingCountQuery, BookingListQuery, NewBooking, UpdateBookingRequest},
    responses::BookingListResponse,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

fn status_strings(statuses: &[BookingStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.to_string()).collect()
}

impl SeaOrmStorage {
    /// 创建预约，初始状态为 pending
    pub async fn create_booking_impl(&self, req: NewBooking) -> Result<Booking> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            reference: Set(uuid::Uuid::new_v4().to_string()),
            student_id: Set(req.student_id),
            tutor_id: Set(req.tutor_id),
            course_id: Set(req.course_id),
            status: Set(BookingStatus::Pending.to_string()),
            scheduled_at: Set(req.scheduled_at.timestamp()),
            duration_minutes: Set(req.duration_minutes),
            note: Set(optional_text(req.note)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error("创建预约失败", e))?;

        Ok(result.into_booking())
    }

    /// 通过 ID 获取预约
    pub async fn get_booking_by_id_impl(&self, id: i64) -> Result<Option<Booking>> {
        let result = Bookings::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询预约失败: {e}")))?;

        Ok(result.map(|m| m.into_booking()))
    }

    /// 分页列出预约，按预约时间倒序
    pub async fn list_bookings_with_pagination_impl(
        &self,
        query: BookingListQuery,
    ) -> Result<BookingListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Bookings::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(tutor_id) = query.tutor_id {
            select = select.filter(Column::TutorId.eq(tutor_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select
            .order_by_desc(Column::ScheduledAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询预约总数失败: {e}")))?;

        let bookings = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询预约列表失败: {e}")))?;

        Ok(BookingListResponse {
            items: bookings.into_iter().map(|m| m.into_booking()).collect(),
            pagination: pagination_info(page, size, total),
        })
    }

    /// 修改预约时间、时长或备注
    pub async fn update_booking_impl(
        &self,
        id: i64,
        update: UpdateBookingRequest,
    ) -> Result<Option<Booking>> {
        if self.get_booking_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(scheduled_at) = update.scheduled_at {
            model.scheduled_at = Set(scheduled_at.timestamp());
        }
        if let Some(duration) = update.duration_minutes {
            model.duration_minutes = Set(duration);
        }
        if update.note.is_some() {
            model.note = Set(optional_text(update.note));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("更新预约失败: {e}")))?;

        self.get_booking_by_id_impl(id).await
    }

    /// 更新预约状态
    pub async fn update_booking_status_impl(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<Option<Booking>> {
        let result = Bookings::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(status.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("更新预约状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_booking_by_id_impl(id).await
    }

    /// 删除预约
    pub async fn delete_booking_impl(&self, id: i64) -> Result<bool> {
        let result = Bookings::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("删除预约失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按条件统计预约数量
    pub async fn count_bookings_impl(&self, query: BookingCountQuery) -> Result<i64> {
        let mut select = Bookings::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(tutor_id) = query.tutor_id {
            select = select.filter(Column::TutorId.eq(tutor_id));
        }
        if !query.statuses.is_empty() {
            select = select.filter(Column::Status.is_in(status_strings(&query.statuses)));
        }
        if let Some(after) = query.scheduled_after {
            select = select.filter(Column::ScheduledAt.gt(after.timestamp()));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("统计预约数量失败: {e}")))?;

        Ok(count as i64)
    }

    /// 学生在课程下是否存在指定状态的预约
    pub async fn has_booking_for_course_impl(
        &self,
        student_id: i64,
        course_id: i64,
        statuses: &[BookingStatus],
    ) -> Result<bool> {
        let count = Bookings::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Status.is_in(status_strings(statuses)))
            .count(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询预约失败: {e}")))?;

        Ok(count > 0)
    }

    /// 与导师有过预约的学生 ID
    pub async fn list_tutor_student_ids_impl(&self, tutor_id: i64) -> Result<Vec<i64>> {
        let ids = Bookings::find()
            .select_only()
            .column(Column::StudentId)
            .distinct()
            .filter(Column::TutorId.eq(tutor_id))
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询导师学生失败: {e}")))?;

        Ok(ids)
    }
}
