//! 当前用户的个人数据：动态、仪表盘，以及评价删除

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::activities::requests::ActivityQueryParams;
use crate::services::{ActivityService, DashboardService, ReviewService};
use crate::utils::SafeIDI64;

static ACTIVITY_SERVICE: Lazy<ActivityService> = Lazy::new(ActivityService::new_lazy);
static DASHBOARD_SERVICE: Lazy<DashboardService> = Lazy::new(DashboardService::new_lazy);
static REVIEW_SERVICE: Lazy<ReviewService> = Lazy::new(ReviewService::new_lazy);

pub async fn list_activities(
    req: HttpRequest,
    query: web::Query<ActivityQueryParams>,
) -> ActixResult<HttpResponse> {
    ACTIVITY_SERVICE
        .list_activities(query.into_inner(), &req)
        .await
}

pub async fn get_dashboard(req: HttpRequest) -> ActixResult<HttpResponse> {
    DASHBOARD_SERVICE.get_dashboard(&req).await
}

pub async fn delete_review(req: HttpRequest, review_id: SafeIDI64) -> ActixResult<HttpResponse> {
    REVIEW_SERVICE.delete_review(review_id.0, &req).await
}

pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/activities")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_activities)),
    )
    .service(
        web::scope("/api/dashboard")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_dashboard)),
    )
    .service(
        web::scope("/api/reviews")
            .wrap(middlewares::RequireJWT)
            .route("/{id}", web::delete().to(delete_review)),
    );
}
