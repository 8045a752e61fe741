//! 用户活动记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 未知的 action 字符串返回 None，由调用方跳过
    pub fn into_activity(self) -> Option<crate::models::activities::entities::Activity> {
        use crate::models::activities::entities::{Activity, ActivityAction};

        let action = self.action.parse::<ActivityAction>().ok()?;
        Some(Activity {
            id: self.id,
            user_id: self.user_id,
            action,
            description: self.description,
            created_at: super::timestamp_to_datetime(self.created_at),
        })
    }
}
