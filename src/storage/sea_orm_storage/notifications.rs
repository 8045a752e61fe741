//! 通知存储操作

use super::{SeaOrmStorage, pagination_info};
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{Result, TutorHubError};
use crate::models::{
    PaginationQuery,
    notifications::{
        entities::Notification, requests::NewNotification, responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn create_notification_impl(&self, req: NewNotification) -> Result<Notification> {
        let model = ActiveModel {
            user_id: Set(req.user_id),
            kind: Set(req.kind.to_string()),
            title: Set(req.title),
            message: Set(req.message),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 分页列出用户通知，最新的在前
    pub async fn list_notifications_with_pagination_impl(
        &self,
        user_id: i64,
        unread_only: bool,
        pagination: PaginationQuery,
    ) -> Result<NotificationListResponse> {
        let (page, size) = pagination.normalized();

        let mut select = Notifications::find().filter(Column::UserId.eq(user_id));
        if unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询通知总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(NotificationListResponse {
            pagination: pagination_info(page, size, total),
            items: items.into_iter().map(|m| m.into_notification()).collect(),
        })
    }

    pub async fn count_unread_notifications_impl(&self, user_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("统计未读通知失败: {e}")))?;

        Ok(count as i64)
    }

    /// 标记单条通知为已读，不属于该用户时返回 false
    pub async fn mark_notification_read_impl(&self, user_id: i64, id: i64) -> Result<bool> {
        let exists = Notifications::find_by_id(id)
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询通知失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(false);
        }

        Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("更新通知失败: {e}")))?;

        Ok(true)
    }

    /// 全部标记为已读，返回更新条数
    pub async fn mark_all_notifications_read_impl(&self, user_id: i64) -> Result<i64> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, Expr::value(true))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("更新通知失败: {e}")))?;

        Ok(result.rows_affected as i64)
    }

    pub async fn delete_notification_impl(&self, user_id: i64, id: i64) -> Result<bool> {
        let result = Notifications::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("删除通知失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
