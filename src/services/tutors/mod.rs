pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::users::requests::DirectoryQueryParams;
use crate::storage::Storage;

pub struct TutorService {
    storage: Option<Arc<dyn Storage>>,
}

impl TutorService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 公开的导师列表
    pub async fn list_tutors(
        &self,
        query: DirectoryQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_tutors(self, query, request).await
    }

    // 导师详情
    pub async fn get_tutor(&self, tutor_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        get::get_tutor(self, tutor_id, request).await
    }
}
