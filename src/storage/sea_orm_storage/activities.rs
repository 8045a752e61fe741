//! 用户动态存储操作

use super::{SeaOrmStorage, pagination_info};
use crate::entity::activities::{ActiveModel, Column, Entity as Activities};
use crate::errors::{Result, TutorHubError};
use crate::models::{
    PaginationQuery,
    activities::{
        entities::{Activity, ActivityAction},
        responses::ActivityListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn record_activity_impl(
        &self,
        user_id: i64,
        action: ActivityAction,
        description: &str,
    ) -> Result<Activity> {
        let model = ActiveModel {
            user_id: Set(user_id),
            action: Set(action.as_str().to_string()),
            description: Set(description.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("记录用户动态失败: {e}")))?;

        Ok(Activity {
            id: result.id,
            user_id: result.user_id,
            action,
            description: result.description,
            created_at: crate::entity::timestamp_to_datetime(result.created_at),
        })
    }

    pub async fn list_activities_with_pagination_impl(
        &self,
        user_id: i64,
        pagination: PaginationQuery,
    ) -> Result<ActivityListResponse> {
        let (page, size) = pagination.normalized();

        let paginator = Activities::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询动态总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorHubError::database_operation(format!("查询动态列表失败: {e}")))?;

        Ok(ActivityListResponse {
            pagination: pagination_info(page, size, total),
            items: items.into_iter().filter_map(|m| m.into_activity()).collect(),
        })
    }
}
