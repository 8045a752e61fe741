//! 导师与学生目录

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::DirectoryQueryParams;
use crate::services::{StudentService, TutorService};
use crate::utils::SafeIDI64;

static TUTOR_SERVICE: Lazy<TutorService> = Lazy::new(TutorService::new_lazy);
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_tutors(
    req: HttpRequest,
    query: web::Query<DirectoryQueryParams>,
) -> ActixResult<HttpResponse> {
    TUTOR_SERVICE.list_tutors(query.into_inner(), &req).await
}

pub async fn get_tutor(req: HttpRequest, tutor_id: SafeIDI64) -> ActixResult<HttpResponse> {
    TUTOR_SERVICE.get_tutor(tutor_id.0, &req).await
}

pub async fn list_students(
    req: HttpRequest,
    query: web::Query<DirectoryQueryParams>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(query.into_inner(), &req).await
}

pub async fn get_student(req: HttpRequest, student_id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_student(student_id.0, &req).await
}

pub fn configure_directory_routes(cfg: &mut web::ServiceConfig) {
    // 导师目录公开
    cfg.service(
        web::scope("/api/tutors")
            .route("", web::get().to(list_tutors))
            .route("/{id}", web::get().to(get_tutor)),
    );
    cfg.service(
        web::scope("/api/students")
            .wrap(middlewares::RequireRole::new_any(UserRole::tutor_roles()))
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_students))
            .route("/{id}", web::get().to(get_student)),
    );
}
