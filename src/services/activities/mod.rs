pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::activities::{entities::ActivityAction, requests::ActivityQueryParams};
use crate::storage::Storage;

pub struct ActivityService {
    storage: Option<Arc<dyn Storage>>,
}

impl ActivityService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取动态列表
    pub async fn list_activities(
        &self,
        query: ActivityQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_activities(self, query, request).await
    }
}

/// 记录用户动态，失败只记日志，不影响主流程
pub(crate) async fn record(
    storage: &Arc<dyn Storage>,
    user_id: i64,
    action: ActivityAction,
    description: impl AsRef<str>,
) {
    if let Err(e) = storage
        .record_activity(user_id, action, description.as_ref())
        .await
    {
        tracing::warn!(
            "Failed to record activity {} for user {}: {}",
            action,
            user_id,
            e
        );
    }
}
