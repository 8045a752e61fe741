//! 课程资料存储操作（作业、图文内容、视频）
//!
//! 所有查询都带上 course_id 条件，资料 ID 属于其他课程时按不存在处理。

use super::{SeaOrmStorage, map_insert_error};
use crate::entity::{assignments, contents, videos};
use crate::errors::{Result, TutorHubError};
use crate::models::materials::{
    entities::{Assignment, Content, Video},
    requests::{
        CreateAssignmentRequest, CreateContentRequest, CreateVideoRequest,
        UpdateAssignmentRequest, UpdateContentRequest, UpdateVideoRequest,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    // 作业
    pub async fn create_assignment_impl(
        &self,
        course_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();
        let model = assignments::ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            description: Set(req.description),
            due_at: Set(req.due_at.map(|t| t.timestamp())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error("创建作业失败", e))?;

        Ok(result.into_assignment())
    }

    pub async fn get_assignment_impl(&self, course_id: i64, id: i64) -> Result<Option<Assignment>> {
        let result = assignments::Entity::find_by_id(id)
            .filter(assignments::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    pub async fn list_assignments_impl(&self, course_id: i64) -> Result<Vec<Assignment>> {
        let items = assignments::Entity::find()
            .filter(assignments::Column::CourseId.eq(course_id))
            .order_by_asc(assignments::Column::DueAt)
            .order_by_asc(assignments::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_assignment()).collect())
    }

    pub async fn update_assignment_impl(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        if self.get_assignment_impl(course_id, id).await?.is_none() {
            return Ok(None);
        }

        let mut model = assignments::ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }
        if let Some(due_at) = update.due_at {
            model.due_at = Set(Some(due_at.timestamp()));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_assignment_impl(course_id, id).await
    }

    pub async fn delete_assignment_impl(&self, course_id: i64, id: i64) -> Result<bool> {
        let result = assignments::Entity::delete_many()
            .filter(assignments::Column::Id.eq(id))
            .filter(assignments::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 图文内容
    pub async fn create_content_impl(
        &self,
        course_id: i64,
        req: CreateContentRequest,
    ) -> Result<Content> {
        let now = chrono::Utc::now().timestamp();
        let model = contents::ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            body: Set(req.body),
            position: Set(req.position),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error("创建课程内容失败", e))?;

        Ok(result.into_content())
    }

    pub async fn get_content_impl(&self, course_id: i64, id: i64) -> Result<Option<Content>> {
        let result = contents::Entity::find_by_id(id)
            .filter(contents::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询课程内容失败: {e}")))?;

        Ok(result.map(|m| m.into_content()))
    }

    /// 按 position 升序列出
    pub async fn list_contents_impl(&self, course_id: i64) -> Result<Vec<Content>> {
        let items = contents::Entity::find()
            .filter(contents::Column::CourseId.eq(course_id))
            .order_by_asc(contents::Column::Position)
            .order_by_asc(contents::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                TutorHubError::database_operation(format!("查询课程内容列表失败: {e}"))
            })?;

        Ok(items.into_iter().map(|m| m.into_content()).collect())
    }

    pub async fn update_content_impl(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateContentRequest,
    ) -> Result<Option<Content>> {
        if self.get_content_impl(course_id, id).await?.is_none() {
            return Ok(None);
        }

        let mut model = contents::ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(body) = update.body {
            model.body = Set(body);
        }
        if let Some(position) = update.position {
            model.position = Set(position);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("更新课程内容失败: {e}")))?;

        self.get_content_impl(course_id, id).await
    }

    pub async fn delete_content_impl(&self, course_id: i64, id: i64) -> Result<bool> {
        let result = contents::Entity::delete_many()
            .filter(contents::Column::Id.eq(id))
            .filter(contents::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("删除课程内容失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // 视频
    pub async fn create_video_impl(&self, course_id: i64, req: CreateVideoRequest) -> Result<Video> {
        let now = chrono::Utc::now().timestamp();
        let model = videos::ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            url: Set(req.url),
            duration_seconds: Set(req.duration_seconds),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_insert_error("创建视频失败", e))?;

        Ok(result.into_video())
    }

    pub async fn get_video_impl(&self, course_id: i64, id: i64) -> Result<Option<Video>> {
        let result = videos::Entity::find_by_id(id)
            .filter(videos::Column::CourseId.eq(course_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询视频失败: {e}")))?;

        Ok(result.map(|m| m.into_video()))
    }

    pub async fn list_videos_impl(&self, course_id: i64) -> Result<Vec<Video>> {
        let items = videos::Entity::find()
            .filter(videos::Column::CourseId.eq(course_id))
            .order_by_asc(videos::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询视频列表失败: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_video()).collect())
    }

    pub async fn update_video_impl(
        &self,
        course_id: i64,
        id: i64,
        update: UpdateVideoRequest,
    ) -> Result<Option<Video>> {
        if self.get_video_impl(course_id, id).await?.is_none() {
            return Ok(None);
        }

        let mut model = videos::ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(title) = update.title {
            model.title = Set(title);
        }
        if let Some(url) = update.url {
            model.url = Set(url);
        }
        if let Some(duration) = update.duration_seconds {
            model.duration_seconds = Set(duration);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("更新视频失败: {e}")))?;

        self.get_video_impl(course_id, id).await
    }

    pub async fn delete_video_impl(&self, course_id: i64, id: i64) -> Result<bool> {
        let result = videos::Entity::delete_many()
            .filter(videos::Column::Id.eq(id))
            .filter(videos::Column::CourseId.eq(course_id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("删除视频失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
