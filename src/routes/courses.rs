//! 课程、课程评价与课程资料
//!
//! 整个作用域挂 OptionalJWT：公开读取允许匿名访问，写操作在服务层要求登录。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::courses::requests::{
    CourseQueryParams, CreateCourseRequest, UpdateCourseRequest,
};
use crate::models::materials::requests::{
    CreateAssignmentRequest, CreateContentRequest, CreateVideoRequest, UpdateAssignmentRequest,
    UpdateContentRequest, UpdateVideoRequest,
};
use crate::models::reviews::requests::CreateReviewRequest;
use crate::services::{CourseService, MaterialService, ReviewService};
use crate::utils::{SafeCourseIdI64, SafeIDI64};

static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static REVIEW_SERVICE: Lazy<ReviewService> = Lazy::new(ReviewService::new_lazy);
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// 课程
pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(query.into_inner(), &req).await
}

pub async fn create_course(
    req: HttpRequest,
    course_data: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .create_course(course_data.into_inner(), &req)
        .await
}

pub async fn get_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(course_id.0, &req).await
}

pub async fn update_course(
    req: HttpRequest,
    course_id: SafeIDI64,
    update_data: web::Json<UpdateCourseRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .update_course(course_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(course_id.0, &req).await
}

// 评价
pub async fn list_reviews(
    req: HttpRequest,
    course_id: SafeIDI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .list_reviews(course_id.0, query.into_inner(), &req)
        .await
}

pub async fn create_review(
    req: HttpRequest,
    course_id: SafeIDI64,
    review_data: web::Json<CreateReviewRequest>,
) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE
        .create_review(course_id.0, review_data.into_inner(), &req)
        .await
}

// 作业
pub async fn list_assignments(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_assignments(course_id.0, &req).await
}

pub async fn get_assignment(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_assignment(course_id.0, id.0, &req).await
}

pub async fn create_assignment(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_assignment(course_id.0, data.into_inner(), &req)
        .await
}

pub async fn update_assignment(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
    data: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_assignment(course_id.0, id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .delete_assignment(course_id.0, id.0, &req)
        .await
}

// 课程内容
pub async fn list_contents(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_contents(course_id.0, &req).await
}

pub async fn get_content(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_content(course_id.0, id.0, &req).await
}

pub async fn create_content(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    data: web::Json<CreateContentRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_content(course_id.0, data.into_inner(), &req)
        .await
}

pub async fn update_content(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
    data: web::Json<UpdateContentRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_content(course_id.0, id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_content(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_content(course_id.0, id.0, &req).await
}

// 视频
pub async fn list_videos(req: HttpRequest, course_id: SafeCourseIdI64) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.list_videos(course_id.0, &req).await
}

pub async fn get_video(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.get_video(course_id.0, id.0, &req).await
}

pub async fn create_video(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    data: web::Json<CreateVideoRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .create_video(course_id.0, data.into_inner(), &req)
        .await
}

pub async fn update_video(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
    data: web::Json<UpdateVideoRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .update_video(course_id.0, id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_video(
    req: HttpRequest,
    course_id: SafeCourseIdI64,
    id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE.delete_video(course_id.0, id.0, &req).await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/courses")
            .wrap(middlewares::OptionalJWT)
            .route("", web::get().to(list_courses))
            .route("", web::post().to(create_course))
            .route("/{id}", web::get().to(get_course))
            .route("/{id}", web::put().to(update_course))
            .route("/{id}", web::delete().to(delete_course))
            .route("/{id}/reviews", web::get().to(list_reviews))
            .route("/{id}/reviews", web::post().to(create_review))
            .route("/{course_id}/assignments", web::get().to(list_assignments))
            .route("/{course_id}/assignments", web::post().to(create_assignment))
            .route("/{course_id}/assignments/{id}", web::get().to(get_assignment))
            .route("/{course_id}/assignments/{id}", web::put().to(update_assignment))
            .route("/{course_id}/assignments/{id}", web::delete().to(delete_assignment))
            .route("/{course_id}/contents", web::get().to(list_contents))
            .route("/{course_id}/contents", web::post().to(create_content))
            .route("/{course_id}/contents/{id}", web::get().to(get_content))
            .route("/{course_id}/contents/{id}", web::put().to(update_content))
            .route("/{course_id}/contents/{id}", web::delete().to(delete_content))
            .route("/{course_id}/videos", web::get().to(list_videos))
            .route("/{course_id}/videos", web::post().to(create_video))
            .route("/{course_id}/videos/{id}", web::get().to(get_video))
            .route("/{course_id}/videos/{id}", web::put().to(update_video))
            .route("/{course_id}/videos/{id}", web::delete().to(delete_video)),
    );
}
