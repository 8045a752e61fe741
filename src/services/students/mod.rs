pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::{entities::User, requests::DirectoryQueryParams};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 学生列表（管理员全部，导师仅自己的学生）
    pub async fn list_students(
        &self,
        query: DirectoryQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, query, request).await
    }

    // 学生详情
    pub async fn get_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_student(self, student_id, request).await
    }
}

/// 可见的学生范围：管理员为 None（全部），导师为有过预约的学生
pub(crate) async fn visible_student_ids(
    storage: &Arc<dyn Storage>,
    viewer: &User,
) -> crate::errors::Result<Option<Vec<i64>>> {
    if viewer.is_admin() {
        return Ok(None);
    }
    storage.list_tutor_student_ids(viewer.id).await.map(Some)
}
