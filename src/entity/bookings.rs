//! 预约实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub reference: String,
    pub student_id: i64,
    pub tutor_id: i64,
    pub course_id: i64,
    pub status: String,
    pub scheduled_at: i64,
    pub duration_minutes: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_booking(self) -> crate::models::bookings::entities::Booking {
        use crate::models::bookings::entities::{Booking, BookingStatus};

        Booking {
            id: self.id,
            reference: self.reference,
            student_id: self.student_id,
            tutor_id: self.tutor_id,
            course_id: self.course_id,
            status: self
                .status
                .parse::<BookingStatus>()
                .unwrap_or(BookingStatus::Pending),
            scheduled_at: super::timestamp_to_datetime(self.scheduled_at),
            duration_minutes: self.duration_minutes,
            note: self.note,
            created_at: super::timestamp_to_datetime(self.created_at),
            updated_at: super::timestamp_to_datetime(self.updated_at),
        }
    }
}
