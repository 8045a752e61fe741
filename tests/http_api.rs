//! HTTP 接口集成测试：真实路由 + 临时 SQLite + Moka 缓存

use actix_web::{App, http::StatusCode, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tutorhub::cache::ObjectCache;
use tutorhub::cache::object_cache::moka::MokaCacheWrapper;
use tutorhub::config::DatabaseConfig;
use tutorhub::models::ErrorCode;
use tutorhub::models::bookings::entities::{Booking, BookingStatus};
use tutorhub::models::bookings::requests::NewBooking;
use tutorhub::models::courses::requests::CreateCourseRequest;
use tutorhub::models::users::entities::{User, UserProfile, UserRole, UserStatus};
use tutorhub::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use tutorhub::routes;
use tutorhub::storage::Storage;
use tutorhub::storage::sea_orm_storage::SeaOrmStorage;
use tutorhub::utils::jwt::JwtUtils;
use tutorhub::utils::password::hash_password;
use tutorhub::utils::{json_error_handler, query_error_handler};

const PASSWORD: &str = "Str0ng-Passw0rd";

struct TestDb {
    storage: Arc<dyn Storage>,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", self.path.display(), suffix));
        }
    }
}

async fn setup() -> TestDb {
    let path = std::env::temp_dir().join(format!("tutorhub-http-{}.db", uuid::Uuid::new_v4()));
    let config = DatabaseConfig {
        url: path.display().to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::connect(&config).await.unwrap());
    TestDb { storage, path }
}

macro_rules! init_app {
    ($db:expr) => {{
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(1_000, 60));
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($db.storage.clone()))
                .app_data(web::Data::new(cache))
                .configure(routes::configure_auth_routes)
                .configure(routes::configure_user_routes)
                .configure(routes::configure_directory_routes)
                .configure(routes::configure_courses_routes)
                .configure(routes::configure_bookings_routes),
        )
        .await
    }};
}

// 限流按来源地址计数，每个请求用独立地址
fn next_peer() -> std::net::SocketAddr {
    static NEXT: AtomicU32 = AtomicU32::new(1);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    format!("10.{}.{}.{}:40000", (n >> 16) & 0xff, (n >> 8) & 0xff, n & 0xff)
        .parse()
        .unwrap()
}

fn bearer(user: &User) -> (&'static str, String) {
    let token = JwtUtils::generate_access_token(user.id, &user.role.to_string()).unwrap();
    ("Authorization", format!("Bearer {token}"))
}

async fn user(storage: &Arc<dyn Storage>, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: hash_password(PASSWORD).unwrap(),
            role,
            profile: UserProfile::default(),
        })
        .await
        .unwrap()
}

async fn course(storage: &Arc<dyn Storage>, tutor_id: i64, is_published: bool) -> i64 {
    storage
        .create_course(CreateCourseRequest {
            tutor_id: Some(tutor_id),
            title: "Geometry".to_string(),
            description: Some("Angles and proofs".to_string()),
            subject: Some("math".to_string()),
            price: 35.0,
            duration_minutes: 60,
            is_published,
        })
        .await
        .unwrap()
        .id
}

async fn booking(storage: &Arc<dyn Storage>, student: &User, tutor: &User, course_id: i64) -> Booking {
    storage
        .create_booking(NewBooking {
            student_id: student.id,
            tutor_id: tutor.id,
            course_id,
            scheduled_at: Utc::now() + Duration::days(3),
            duration_minutes: 60,
            note: None,
        })
        .await
        .unwrap()
}

fn code(body: &Value) -> i64 {
    body["code"].as_i64().unwrap()
}

#[actix_web::test]
async fn test_register_cannot_claim_admin_role() {
    let db = setup().await;
    let app = init_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .peer_addr(next_peer())
        .set_json(json!({
            "username": "mallory",
            "email": "mallory@example.com",
            "password": PASSWORD,
            "role": "admin"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::RoleNotAllowed as i64);
    assert!(db.storage.get_user_by_username("mallory").await.unwrap().is_none());

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .peer_addr(next_peer())
        .set_json(json!({
            "username": "tina_t",
            "email": "tina_t@example.com",
            "password": PASSWORD,
            "role": "tutor"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_login_redirects_by_role_and_rejects_inactive() {
    let db = setup().await;
    let app = init_app!(db);
    user(&db.storage, "tutor_login", UserRole::Tutor).await;
    let student = user(&db.storage, "student_login", UserRole::Student).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .peer_addr(next_peer())
        .set_json(json!({ "username": "Tutor_Login@Example.com", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["redirect_to"], "/tutor/dashboard");
    assert!(body["data"]["access_token"].as_str().is_some());

    db.storage
        .update_user(
            student.id,
            UpdateUserRequest {
                status: Some(UserStatus::Suspended),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .peer_addr(next_peer())
        .set_json(json!({ "username": "student_login", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::AccountInactive as i64);
}

#[actix_web::test]
async fn test_forwarded_header_does_not_reset_register_limit() {
    let db = setup().await;
    let app = init_app!(db);
    let peer = next_peer();

    let mut statuses = Vec::new();
    for i in 0..4 {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .peer_addr(peer)
            .insert_header(("X-Forwarded-For", format!("198.51.100.{i}")))
            .set_json(json!({
                "username": format!("spoof{i}"),
                "email": format!("spoof{i}@example.com"),
                "password": PASSWORD,
                "role": "admin"
            }))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }
    assert_eq!(&statuses[..3], &[StatusCode::FORBIDDEN; 3]);
    assert_eq!(statuses[3], StatusCode::TOO_MANY_REQUESTS);
}

#[actix_web::test]
async fn test_only_student_edits_pending_booking() {
    let db = setup().await;
    let app = init_app!(db);
    let tutor = user(&db.storage, "tutor_edit", UserRole::Tutor).await;
    let student = user(&db.storage, "student_edit", UserRole::Student).await;
    let course_id = course(&db.storage, tutor.id, true).await;
    let created = booking(&db.storage, &student, &tutor, course_id).await;
    let uri = format!("/api/bookings/{}", created.id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&tutor))
        .set_json(json!({ "note": "tutor edit" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&student))
        .set_json(json!({ "note": "  bring the workbook " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["note"], "bring the workbook");

    // 空串清空备注
    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&student))
        .set_json(json!({ "note": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["note"].is_null());

    db.storage
        .update_booking_status(created.id, BookingStatus::Confirmed)
        .await
        .unwrap();
    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&student))
        .set_json(json!({ "note": "too late" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::BookingInvalid as i64);
}

#[actix_web::test]
async fn test_booking_status_transitions_follow_roles() {
    let db = setup().await;
    let app = init_app!(db);
    let tutor = user(&db.storage, "tutor_status", UserRole::Tutor).await;
    let student = user(&db.storage, "student_status", UserRole::Student).await;
    let outsider = user(&db.storage, "tutor_other", UserRole::Tutor).await;
    let course_id = course(&db.storage, tutor.id, true).await;
    let created = booking(&db.storage, &student, &tutor, course_id).await;
    let uri = format!("/api/bookings/{}/status", created.id);

    let put_status = |who: &User, status: &str| {
        test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(who))
            .set_json(json!({ "status": status }))
            .to_request()
    };

    let resp = test::call_service(&app, put_status(&student, "confirmed")).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(&app, put_status(&outsider, "confirmed")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(&app, put_status(&tutor, "completed")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::BookingStatusTransitionInvalid as i64);

    let resp = test::call_service(&app, put_status(&tutor, "confirmed")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = test::call_service(&app, put_status(&tutor, "completed")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "completed");

    // 终态不可再变
    let resp = test::call_service(&app, put_status(&student, "cancelled")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_review_requires_completed_booking_and_is_unique() {
    let db = setup().await;
    let app = init_app!(db);
    let tutor = user(&db.storage, "tutor_review", UserRole::Tutor).await;
    let student = user(&db.storage, "student_review", UserRole::Student).await;
    let course_id = course(&db.storage, tutor.id, true).await;
    let created = booking(&db.storage, &student, &tutor, course_id).await;
    let uri = format!("/api/courses/{course_id}/reviews");

    let review = || {
        test::TestRequest::post()
            .uri(&uri)
            .insert_header(bearer(&student))
            .set_json(json!({ "rating": 5, "comment": "Very patient" }))
            .to_request()
    };

    let resp = test::call_service(&app, review()).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::ReviewNotEligible as i64);

    for status in [BookingStatus::Confirmed, BookingStatus::Completed] {
        db.storage
            .update_booking_status(created.id, status)
            .await
            .unwrap();
    }

    let resp = test::call_service(&app, review()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, review()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::ReviewAlreadyExists as i64);
}

#[actix_web::test]
async fn test_materials_require_enrollment() {
    let db = setup().await;
    let app = init_app!(db);
    let tutor = user(&db.storage, "tutor_mat", UserRole::Tutor).await;
    let enrolled = user(&db.storage, "student_mat", UserRole::Student).await;
    let stranger = user(&db.storage, "student_none", UserRole::Student).await;
    let course_id = course(&db.storage, tutor.id, true).await;
    booking(&db.storage, &enrolled, &tutor, course_id).await;
    let uri = format!("/api/courses/{course_id}/assignments");

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&stranger))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::MaterialPermissionDenied as i64);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&enrolled))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // 学生只读
    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&enrolled))
        .set_json(json!({ "title": "Homework" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&tutor))
        .set_json(json!({ "title": "Homework" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_tutor_lists_only_booked_students() {
    let db = setup().await;
    let app = init_app!(db);
    let tutor = user(&db.storage, "tutor_dir", UserRole::Tutor).await;
    let booked = user(&db.storage, "student_booked", UserRole::Student).await;
    let other = user(&db.storage, "student_other", UserRole::Student).await;
    let course_id = course(&db.storage, tutor.id, true).await;
    booking(&db.storage, &booked, &tutor, course_id).await;

    let req = test::TestRequest::get()
        .uri("/api/students")
        .insert_header(bearer(&tutor))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let ids: Vec<i64> = body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![booked.id]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/students/{}", other.id))
        .insert_header(bearer(&tutor))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/students")
        .insert_header(bearer(&booked))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_cannot_delete_or_demote_self() {
    let db = setup().await;
    let app = init_app!(db);
    let admin = user(&db.storage, "admin_self", UserRole::Admin).await;
    let uri = format!("/api/users/{}", admin.id);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(code(&body), ErrorCode::CanNotDeleteCurrentUser as i64);

    for payload in [json!({ "role": "student" }), json!({ "status": "suspended" })] {
        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(&admin))
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(code(&body), ErrorCode::CanNotDemoteCurrentUser as i64);
    }

    let kept = db.storage.get_user_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(kept.role, UserRole::Admin);
    assert!(kept.is_active());
}

#[actix_web::test]
async fn test_tutor_profile_hides_inactive_and_drafts() {
    let db = setup().await;
    let app = init_app!(db);
    let tutor = user(&db.storage, "tutor_pub", UserRole::Tutor).await;
    course(&db.storage, tutor.id, true).await;
    course(&db.storage, tutor.id, false).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/tutors/{}", tutor.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["course_count"], 1);

    db.storage
        .update_user(
            tutor.id,
            UpdateUserRequest {
                status: Some(UserStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/tutors/{}", tutor.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_huge_page_number_is_clamped() {
    let db = setup().await;
    let app = init_app!(db);
    let tutor = user(&db.storage, "tutor_page", UserRole::Tutor).await;
    course(&db.storage, tutor.id, true).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/courses?page={}&size=100", i64::MAX))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"]["items"].as_array().unwrap().is_empty());
}
