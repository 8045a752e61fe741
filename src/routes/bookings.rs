use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::bookings::requests::{
    BookingQueryParams, CreateBookingRequest, UpdateBookingRequest, UpdateBookingStatusRequest,
};
use crate::services::BookingService;
use crate::utils::SafeIDI64;

// 懒加载的全局 BookingService 实例
static BOOKING_SERVICE: Lazy<BookingService> = Lazy::new(BookingService::new_lazy);

pub async fn list_bookings(
    req: HttpRequest,
    query: web::Query<BookingQueryParams>,
) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE.list_bookings(query.into_inner(), &req).await
}

pub async fn create_booking(
    req: HttpRequest,
    booking_data: web::Json<CreateBookingRequest>,
) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE
        .create_booking(booking_data.into_inner(), &req)
        .await
}

pub async fn get_booking(req: HttpRequest, booking_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE.get_booking(booking_id.0, &req).await
}

pub async fn update_booking(
    req: HttpRequest,
    booking_id: SafeIDI64,
    update_data: web::Json<UpdateBookingRequest>,
) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE
        .update_booking(booking_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn update_booking_status(
    req: HttpRequest,
    booking_id: SafeIDI64,
    status_data: web::Json<UpdateBookingStatusRequest>,
) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE
        .update_status(booking_id.0, status_data.into_inner(), &req)
        .await
}

pub async fn delete_booking(req: HttpRequest, booking_id: SafeIDI64) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE.delete_booking(booking_id.0, &req).await
}

// 配置路由
pub fn configure_bookings_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/bookings")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_bookings))
            .route("", web::post().to(create_booking))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}", web::put().to(update_booking))
            .route("/{id}", web::delete().to(delete_booking))
            .route("/{id}/status", web::put().to(update_booking_status)),
    );
}
