//! 课程存储操作

use super::{SeaOrmStorage, optional_text, pagination_info};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{Result, TutorHubError};
use crate::models::common::page_bounds;
use crate::models::courses::{
    entities::Course,
    requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    responses::CourseListResponse,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();

        // tutor_id 必须由服务层确保已设置
        let tutor_id = req.tutor_id.ok_or_else(|| {
            TutorHubError::database_operation("tutor_id must be set before calling create_course")
        })?;

        let model = ActiveModel {
            tutor_id: Set(tutor_id),
            title: Set(req.title),
            description: Set(optional_text(req.description)),
            subject: Set(optional_text(req.subject)),
            price: Set(req.price),
            duration_minutes: Set(req.duration_minutes),
            is_published: Set(req.is_published),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = page_bounds(query.page, query.size);

        let mut select = Courses::find();

        if let Some(tutor_id) = query.tutor_id {
            select = select.filter(Column::TutorId.eq(tutor_id));
        }

        if let Some(ref subject) = query.subject
            && !subject.trim().is_empty()
        {
            select = select.filter(Column::Subject.eq(subject.trim()));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(contains_pattern(pattern)))
                    .add(Column::Description.like(contains_pattern(pattern))),
            );
        }

        // 发布状态：未发布课程只对所属导师可见
        if query.published_only {
            let mut visible = Condition::any().add(Column::IsPublished.eq(true));
            if let Some(owner_id) = query.owner_id {
                visible = visible.add(Column::TutorId.eq(owner_id));
            }
            select = select.filter(visible);
        }

        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询课程总数失败: {e}")))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: pagination_info(page, size, total),
        })
    }

    /// 更新课程
    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        if self.get_course_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }
        // 传空串即清空
        if update.description.is_some() {
            model.description = Set(optional_text(update.description));
        }
        if update.subject.is_some() {
            model.subject = Set(optional_text(update.subject));
        }
        if let Some(price) = update.price {
            model.price = Set(price);
        }
        if let Some(duration) = update.duration_minutes {
            model.duration_minutes = Set(duration);
        }
        if let Some(is_published) = update.is_published {
            model.is_published = Set(is_published);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(id).await
    }

    /// 删除课程（预约、评价和资料由外键级联删除）
    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计课程数量
    pub async fn count_courses_impl(&self, tutor_id: Option<i64>, published_only: bool) -> Result<i64> {
        let mut select = Courses::find();
        if let Some(tutor_id) = tutor_id {
            select = select.filter(Column::TutorId.eq(tutor_id));
        }
        if published_only {
            select = select.filter(Column::IsPublished.eq(true));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("统计课程数量失败: {e}")))?;

        Ok(count as i64)
    }
}
