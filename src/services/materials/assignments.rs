use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    MAX_TITLE_LEN, MaterialAccess, MaterialService, authorize, material_invalid,
    material_not_found, storage_failure,
};
use crate::models::ApiResponse;
use crate::models::materials::{
    entities::MaterialKind,
    requests::{CreateAssignmentRequest, UpdateAssignmentRequest},
    responses::AssignmentListResponse,
};
use crate::utils::validate::validate_title;

const KIND: MaterialKind = MaterialKind::Assignment;

pub async fn list(
    service: &MaterialService,
    course_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = match authorize(service, request, course_id, MaterialAccess::Read).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.list_assignments(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignmentListResponse { items },
            "Assignments retrieved successfully",
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

    match storage.get_assignment(course_id, id).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment retrieved successfully",
        ))),
        Ok(None) => Ok(material_not_found(KIND)),
        Err(e) => Ok(storage_failure(KIND, "get", e)),
    }
}

pub async fn create(
    service: &MaterialService,
    course_id: i64,
    mut data: CreateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&data.title, MAX_TITLE_LEN) {
        return Ok(material_invalid(msg));
    }
    data.title = data.title.trim().to_string();

    let storage = match authorize(service, request, course_id, MaterialAccess::Write).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.create_assignment(course_id, data).await {
        Ok(assignment) => Ok(HttpResponse::Created().json(ApiResponse::success(
            assignment,
            "Assignment created successfully",
        ))),
        Err(e) => Ok(storage_failure(KIND, "create", e)),
    }
}

pub async fn update(
    service: &MaterialService,
    course_id: i64,
    id: i64,
    mut data: UpdateAssignmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref title) = data.title
        && let Err(msg) = validate_title(title, MAX_TITLE_LEN)
    {
        return Ok(material_invalid(msg));
    }
    data.title = data.title.map(|t| t.trim().to_string());

    let storage = match authorize(service, request, course_id, MaterialAccess::Write).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.update_assignment(course_id, id, data).await {
        Ok(Some(assignment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            assignment,
            "Assignment updated successfully",
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

    match storage.delete_assignment(course_id, id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Assignment deleted successfully",
        ))),
        Ok(false) => Ok(material_not_found(KIND)),
        Err(e) => Ok(storage_failure(KIND, "delete", e)),
    }
}
