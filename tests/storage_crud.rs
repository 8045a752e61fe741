//! SeaORM 存储层集成测试（临时 SQLite 文件）

use chrono::{Duration, Utc};
use std::path::PathBuf;

use tutorhub::config::DatabaseConfig;
use tutorhub::models::PaginationQuery;
use tutorhub::models::bookings::entities::BookingStatus;
use tutorhub::models::bookings::requests::{BookingListQuery, NewBooking};
use tutorhub::models::bookings::requests::UpdateBookingRequest;
use tutorhub::models::courses::requests::{
    CourseListQuery, CreateCourseRequest, UpdateCourseRequest,
};
use tutorhub::models::materials::requests::CreateAssignmentRequest;
use tutorhub::models::notifications::entities::NotificationKind;
use tutorhub::models::notifications::requests::NewNotification;
use tutorhub::models::reviews::requests::CreateReviewRequest;
use tutorhub::models::users::entities::{User, UserProfile, UserRole, UserStatus};
use tutorhub::models::users::requests::{CreateUserRequest, UpdateUserRequest};
use tutorhub::storage::Storage;
use tutorhub::storage::sea_orm_storage::SeaOrmStorage;

struct TestDb {
    storage: SeaOrmStorage,
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
    let path = std::env::temp_dir().join(format!("tutorhub-test-{}.db", uuid::Uuid::new_v4()));
    let config = DatabaseConfig {
        url: path.display().to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = SeaOrmStorage::connect(&config).await.unwrap();
    TestDb { storage, path }
}

async fn user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "not-a-real-hash".to_string(),
            role,
            profile: UserProfile::default(),
        })
        .await
        .unwrap()
}

fn course_request(title: &str) -> CreateCourseRequest {
    CreateCourseRequest {
        tutor_id: None,
        title: title.to_string(),
        description: None,
        subject: Some("math".to_string()),
        price: 40.0,
        duration_minutes: 60,
        is_published: true,
    }
}

async fn course(storage: &SeaOrmStorage, tutor_id: i64) -> i64 {
    let mut req = course_request("Algebra I");
    req.tutor_id = Some(tutor_id);
    storage.create_course(req).await.unwrap().id
}

fn new_booking(student_id: i64, tutor_id: i64, course_id: i64) -> NewBooking {
    NewBooking {
        student_id,
        tutor_id,
        course_id,
        scheduled_at: Utc::now() + Duration::days(2),
        duration_minutes: 60,
        note: Some("chapter 3".to_string()),
    }
}

#[tokio::test]
async fn test_user_create_and_lookup() {
    let db = setup().await;
    let created = user(&db.storage, "alice_t", UserRole::Tutor).await;

    let by_id = db.storage.get_user_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "alice_t");
    assert_eq!(by_id.role, UserRole::Tutor);
    assert!(by_id.is_active());

    let by_email = db
        .storage
        .get_user_by_username_or_email("alice_t@example.com")
        .await
        .unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(created.id));
    assert_eq!(db.storage.count_users().await.unwrap(), 1);
    assert_eq!(db.storage.count_users_by_role(UserRole::Student).await.unwrap(), 0);
}

#[tokio::test]
async fn test_duplicate_username_is_unique_violation() {
    let db = setup().await;
    user(&db.storage, "bob_s", UserRole::Student).await;

    let err = db
        .storage
        .create_user(CreateUserRequest {
            username: "bob_s".to_string(),
            email: "other@example.com".to_string(),
            password: "x".to_string(),
            role: UserRole::Student,
            profile: UserProfile::default(),
        })
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn test_delete_missing_rows_reports_false() {
    let db = setup().await;
    assert!(!db.storage.delete_user(999).await.unwrap());
    assert!(!db.storage.delete_course(999).await.unwrap());
    assert!(db.storage.get_booking_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_booking_status_update() {
    let db = setup().await;
    let tutor = user(&db.storage, "tutor_a", UserRole::Tutor).await;
    let student = user(&db.storage, "student_a", UserRole::Student).await;
    let course_id = course(&db.storage, tutor.id).await;

    let booking = db
        .storage
        .create_booking(new_booking(student.id, tutor.id, course_id))
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert!(!booking.reference.is_empty());

    let confirmed = db
        .storage
        .update_booking_status(booking.id, BookingStatus::Confirmed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let listed = db
        .storage
        .list_bookings_with_pagination(BookingListQuery {
            tutor_id: Some(tutor.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 1);

    assert!(
        db.storage
            .has_booking_for_course(student.id, course_id, &[BookingStatus::Confirmed])
            .await
            .unwrap()
    );
    assert!(
        !db.storage
            .has_booking_for_course(student.id, course_id, &[BookingStatus::Completed])
            .await
            .unwrap()
    );
    assert_eq!(
        db.storage.list_tutor_student_ids(tutor.id).await.unwrap(),
        vec![student.id]
    );
}

#[tokio::test]
async fn test_second_review_for_same_course_conflicts() {
    let db = setup().await;
    let tutor = user(&db.storage, "tutor_b", UserRole::Tutor).await;
    let student = user(&db.storage, "student_b", UserRole::Student).await;
    let course_id = course(&db.storage, tutor.id).await;

    let review = CreateReviewRequest {
        rating: 4,
        comment: Some("Clear explanations".to_string()),
    };
    db.storage
        .create_review(course_id, student.id, review)
        .await
        .unwrap();

    let again = CreateReviewRequest {
        rating: 5,
        comment: None,
    };
    let err = db
        .storage
        .create_review(course_id, student.id, again)
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());

    let summary = db.storage.get_course_rating_summary(course_id).await.unwrap();
    assert_eq!(summary.review_count, 1);
    assert_eq!(summary.average_rating, Some(4.0));
}

#[tokio::test]
async fn test_deleting_course_removes_dependents() {
    let db = setup().await;
    let tutor = user(&db.storage, "tutor_c", UserRole::Tutor).await;
    let student = user(&db.storage, "student_c", UserRole::Student).await;
    let course_id = course(&db.storage, tutor.id).await;

    let booking = db
        .storage
        .create_booking(new_booking(student.id, tutor.id, course_id))
        .await
        .unwrap();
    let assignment = db
        .storage
        .create_assignment(
            course_id,
            CreateAssignmentRequest {
                title: "Worksheet 1".to_string(),
                description: None,
                due_at: None,
            },
        )
        .await
        .unwrap();

    assert!(db.storage.delete_course(course_id).await.unwrap());
    assert!(db.storage.get_course_by_id(course_id).await.unwrap().is_none());
    assert!(db.storage.get_booking_by_id(booking.id).await.unwrap().is_none());
    assert!(
        db.storage
            .get_assignment(course_id, assignment.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_materials_are_scoped_to_course() {
    let db = setup().await;
    let tutor = user(&db.storage, "tutor_d", UserRole::Tutor).await;
    let first = course(&db.storage, tutor.id).await;
    let second = course(&db.storage, tutor.id).await;

    let assignment = db
        .storage
        .create_assignment(
            first,
            CreateAssignmentRequest {
                title: "Quiz".to_string(),
                description: None,
                due_at: None,
            },
        )
        .await
        .unwrap();

    assert!(db.storage.get_assignment(second, assignment.id).await.unwrap().is_none());
    assert!(!db.storage.delete_assignment(second, assignment.id).await.unwrap());
    assert_eq!(db.storage.list_assignments(first).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_notifications_are_scoped_to_owner() {
    let db = setup().await;
    let owner = user(&db.storage, "owner_n", UserRole::Student).await;
    let other = user(&db.storage, "other_n", UserRole::Student).await;

    let notification = db
        .storage
        .create_notification(NewNotification {
            user_id: owner.id,
            kind: NotificationKind::System,
            title: "Welcome".to_string(),
            message: "Thanks for joining".to_string(),
        })
        .await
        .unwrap();
    assert!(!notification.is_read);

    assert!(
        !db.storage
            .mark_notification_read(other.id, notification.id)
            .await
            .unwrap()
    );
    assert!(
        !db.storage
            .delete_notification(other.id, notification.id)
            .await
            .unwrap()
    );
    assert_eq!(db.storage.count_unread_notifications(owner.id).await.unwrap(), 1);

    assert!(
        db.storage
            .mark_notification_read(owner.id, notification.id)
            .await
            .unwrap()
    );
    assert_eq!(db.storage.count_unread_notifications(owner.id).await.unwrap(), 0);

    let unread = db
        .storage
        .list_notifications_with_pagination(owner.id, true, PaginationQuery::default())
        .await
        .unwrap();
    assert!(unread.items.is_empty());
}

#[tokio::test]
async fn test_course_listing_respects_publication_and_owner() {
    let db = setup().await;
    let tutor = user(&db.storage, "tutor_l", UserRole::Tutor).await;
    let other = user(&db.storage, "tutor_m", UserRole::Tutor).await;

    let published = course(&db.storage, tutor.id).await;
    let mut draft = course_request("Calculus draft");
    draft.tutor_id = Some(tutor.id);
    draft.is_published = false;
    let draft = db.storage.create_course(draft).await.unwrap().id;
    let foreign = course(&db.storage, other.id).await;

    let ids = |query: CourseListQuery| {
        let storage = &db.storage;
        async move {
            let mut ids: Vec<i64> = storage
                .list_courses_with_pagination(query)
                .await
                .unwrap()
                .items
                .into_iter()
                .map(|c| c.id)
                .collect();
            ids.sort();
            ids
        }
    };

    let public = ids(CourseListQuery {
        published_only: true,
        ..Default::default()
    })
    .await;
    assert_eq!(public, vec![published, foreign]);

    let as_owner = ids(CourseListQuery {
        published_only: true,
        owner_id: Some(tutor.id),
        ..Default::default()
    })
    .await;
    assert_eq!(as_owner, vec![published, draft, foreign]);

    let own_only = ids(CourseListQuery {
        tutor_id: Some(tutor.id),
        published_only: true,
        owner_id: Some(tutor.id),
        ..Default::default()
    })
    .await;
    assert_eq!(own_only, vec![published, draft]);

    let everything = ids(CourseListQuery::default()).await;
    assert_eq!(everything.len(), 3);

    assert_eq!(db.storage.count_courses(Some(tutor.id), false).await.unwrap(), 2);
    assert_eq!(db.storage.count_courses(Some(tutor.id), true).await.unwrap(), 1);
    assert_eq!(db.storage.count_courses(None, false).await.unwrap(), 3);
}

#[tokio::test]
async fn test_update_user_round_trip() {
    let db = setup().await;
    let created = user(&db.storage, "dora_s", UserRole::Student).await;

    let updated = db
        .storage
        .update_user(
            created.id,
            UpdateUserRequest {
                email: Some("  Dora.New@Example.com ".to_string()),
                role: Some(UserRole::Tutor),
                status: Some(UserStatus::Suspended),
                profile: Some(UserProfile {
                    display_name: Some("Dora".to_string()),
                    avatar_url: None,
                    bio: Some("Chemistry".to_string()),
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.email, "dora.new@example.com");

    let reloaded = db.storage.get_user_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, UserRole::Tutor);
    assert_eq!(reloaded.status, UserStatus::Suspended);
    assert_eq!(reloaded.profile.display_name.as_deref(), Some("Dora"));
    assert_eq!(reloaded.profile.bio.as_deref(), Some("Chemistry"));
    assert_eq!(reloaded.password_hash, created.password_hash);

    assert!(
        db.storage
            .update_user(999, UpdateUserRequest::default())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_email_is_case_insensitive() {
    let db = setup().await;
    let created = db
        .storage
        .create_user(CreateUserRequest {
            username: "erin_t".to_string(),
            email: "Erin@Example.COM".to_string(),
            password: "x".to_string(),
            role: UserRole::Tutor,
            profile: UserProfile::default(),
        })
        .await
        .unwrap();
    assert_eq!(created.email, "erin@example.com");

    let found = db.storage.get_user_by_email("ERIN@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(created.id));
    let found = db
        .storage
        .get_user_by_username_or_email("erin@EXAMPLE.com")
        .await
        .unwrap();
    assert_eq!(found.map(|u| u.id), Some(created.id));

    let err = db
        .storage
        .create_user(CreateUserRequest {
            username: "erin_two".to_string(),
            email: "erin@example.com".to_string(),
            password: "x".to_string(),
            role: UserRole::Student,
            profile: UserProfile::default(),
        })
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
}

#[tokio::test]
async fn test_update_course_round_trip_and_clearing() {
    let db = setup().await;
    let tutor = user(&db.storage, "tutor_u", UserRole::Tutor).await;
    let mut req = course_request("Physics");
    req.tutor_id = Some(tutor.id);
    req.description = Some("Mechanics".to_string());
    let created = db.storage.create_course(req).await.unwrap();

    let updated = db
        .storage
        .update_course(
            created.id,
            UpdateCourseRequest {
                title: Some("Physics II".to_string()),
                price: Some(55.5),
                is_published: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.title, "Physics II");
    assert_eq!(updated.price, 55.5);
    assert!(!updated.is_published);
    assert_eq!(updated.description.as_deref(), Some("Mechanics"));
    assert_eq!(updated.subject.as_deref(), Some("math"));

    // 空串清空可选字段
    let cleared = db
        .storage
        .update_course(
            created.id,
            UpdateCourseRequest {
                description: Some(String::new()),
                subject: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(cleared.description.is_none());
    assert!(cleared.subject.is_none());
    assert_eq!(cleared.title, "Physics II");
}

#[tokio::test]
async fn test_booking_note_can_be_cleared() {
    let db = setup().await;
    let tutor = user(&db.storage, "tutor_note", UserRole::Tutor).await;
    let student = user(&db.storage, "student_note", UserRole::Student).await;
    let course_id = course(&db.storage, tutor.id).await;

    let mut req = new_booking(student.id, tutor.id, course_id);
    req.note = Some("   ".to_string());
    let booking = db.storage.create_booking(req).await.unwrap();
    assert!(booking.note.is_none());

    let noted = db
        .storage
        .update_booking(
            booking.id,
            UpdateBookingRequest {
                note: Some("past papers".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(noted.note.as_deref(), Some("past papers"));

    let cleared = db
        .storage
        .update_booking(
            booking.id,
            UpdateBookingRequest {
                note: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert!(cleared.note.is_none());
}

#[tokio::test]
async fn test_children_of_missing_course_are_not_found() {
    let db = setup().await;
    let student = user(&db.storage, "student_x", UserRole::Student).await;

    let err = db
        .storage
        .create_assignment(
            404,
            CreateAssignmentRequest {
                title: "Orphan".to_string(),
                description: None,
                due_at: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = db
        .storage
        .create_review(
            404,
            student.id,
            CreateReviewRequest {
                rating: 3,
                comment: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_unique_violation());
}
