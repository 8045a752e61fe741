use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    MAX_TITLE_LEN, MaterialAccess, MaterialService, authorize, material_invalid,
    material_not_found, storage_failure,
};
use crate::models::ApiResponse;
use crate::models::materials::{
    entities::MaterialKind,
    requests::{CreateContentRequest, UpdateContentRequest},
    responses::ContentListResponse,
};
use crate::utils::validate::validate_title;

const KIND: MaterialKind = MaterialKind::Content;

fn validate_position(position: i32) -> Result<(), &'static str> {
    if position < 0 {
        return Err("Position must not be negative");
    }
    Ok(())
}

pub async fn list(
    service: &MaterialService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match authorize(service, request, course_id, MaterialAccess::Read).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    // 存储层按 position 排序
    match storage.list_contents(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ContentListResponse { items },
            "Contents retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure(KIND, "list", e)),
    }
}

pub async fn get(
    service: &MaterialService,
    course_id: i64,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match authorize(service, request, course_id, MaterialAccess::Read).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.get_content(course_id, id).await {
        Ok(Some(content)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            content,
            "Content retrieved successfully",
        ))),
        Ok(None) => Ok(material_not_found(KIND)),
        Err(e) => Ok(storage_failure(KIND, "get", e)),
    }
}

pub async fn create(
    service: &MaterialService,
    course_id: i64,
    mut data: CreateContentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&data.title, MAX_TITLE_LEN) {
        return Ok(material_invalid(msg));
    }
    if let Err(msg) = validate_position(data.position) {
        return Ok(material_invalid(msg));
    }
    data.title = data.title.trim().to_string();

    let storage = match authorize(service, request, course_id, MaterialAccess::Write).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.create_content(course_id, data).await {
        Ok(content) => Ok(HttpResponse::Created().json(ApiResponse::success(
            content,
            "Content created successfully",
        ))),
        Err(e) => Ok(storage_failure(KIND, "create", e)),
    }
}

pub async fn update(
    service: &MaterialService,
    course_id: i64,
    id: i64,
    mut data: UpdateContentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref title) = data.title
        && let Err(msg) = validate_title(title, MAX_TITLE_LEN)
    {
        return Ok(material_invalid(msg));
    }
    if let Some(position) = data.position
        && let Err(msg) = validate_position(position)
    {
        return Ok(material_invalid(msg));
    }
    data.title = data.title.map(|t| t.trim().to_string());

    let storage = match authorize(service, request, course_id, MaterialAccess::Write).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.update_content(course_id, id, data).await {
        Ok(Some(content)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            content,
            "Content updated successfully",
        ))),
        Ok(None) => Ok(material_not_found(KIND)),
        Err(e) => Ok(storage_failure(KIND, "update", e)),
    }
}

pub async fn delete(
    service: &MaterialService,
    course_id: i64,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match authorize(service, request, course_id, MaterialAccess::Write).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.delete_content(course_id, id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Content deleted successfully",
        ))),
        Ok(false) => Ok(material_not_found(KIND)),
        Err(e) => Ok(storage_failure(KIND, "delete", e)),
    }
}
