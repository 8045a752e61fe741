use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    MAX_TITLE_LEN, MaterialAccess, MaterialService, authorize, material_invalid,
    material_not_found, storage_failure,
};
use crate::models::ApiResponse;
use crate::models::materials::{
    entities::MaterialKind,
    requests::{CreateVideoRequest, UpdateVideoRequest},
    responses::VideoListResponse,
};
use crate::utils::validate::{validate_title, validate_url};

const KIND: MaterialKind = MaterialKind::Video;

fn validate_duration(seconds: i32) -> Result<(), &'static str> {
    if seconds < 0 {
        return Err("Duration must not be negative");
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

    match storage.list_videos(course_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            VideoListResponse { items },
            "Videos retrieved successfully",
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

    match storage.get_video(course_id, id).await {
        Ok(Some(video)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            video,
            "Video retrieved successfully",
        ))),
        Ok(None) => Ok(material_not_found(KIND)),
        Err(e) => Ok(storage_failure(KIND, "get", e)),
    }
}

pub async fn create(
    service: &MaterialService,
    course_id: i64,
    mut data: CreateVideoRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_title(&data.title, MAX_TITLE_LEN) {
        return Ok(material_invalid(msg));
    }
    if let Err(msg) = validate_url(&data.url) {
        return Ok(material_invalid(msg));
    }
    if let Err(msg) = validate_duration(data.duration_seconds) {
        return Ok(material_invalid(msg));
    }
    data.title = data.title.trim().to_string();
    data.url = data.url.trim().to_string();

    let storage = match authorize(service, request, course_id, MaterialAccess::Write).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.create_video(course_id, data).await {
        Ok(video) => Ok(HttpResponse::Created().json(ApiResponse::success(
            video,
            "Video created successfully",
        ))),
        Err(e) => Ok(storage_failure(KIND, "create", e)),
    }
}

pub async fn update(
    service: &MaterialService,
    course_id: i64,
    id: i64,
    mut data: UpdateVideoRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(ref title) = data.title
        && let Err(msg) = validate_title(title, MAX_TITLE_LEN)
    {
        return Ok(material_invalid(msg));
    }
    if let Some(ref url) = data.url
        && let Err(msg) = validate_url(url)
    {
        return Ok(material_invalid(msg));
    }
    if let Some(seconds) = data.duration_seconds
        && let Err(msg) = validate_duration(seconds)
    {
        return Ok(material_invalid(msg));
    }
    data.title = data.title.map(|t| t.trim().to_string());
    data.url = data.url.map(|u| u.trim().to_string());

    let storage = match authorize(service, request, course_id, MaterialAccess::Write).await {
        Ok(storage) => storage,
        Err(resp) => return Ok(resp),
    };

    match storage.update_video(course_id, id, data).await {
        Ok(Some(video)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            video,
            "Video updated successfully",
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

    match storage.delete_video(course_id, id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Video deleted successfully",
        ))),
        Ok(false) => Ok(material_not_found(KIND)),
        Err(e) => Ok(storage_failure(KIND, "delete", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_duration_rejected() {
        assert!(validate_duration(-1).is_err());
        assert!(validate_duration(0).is_ok());
        assert!(validate_duration(3600).is_ok());
    }
}
