use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "surveys")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub survey_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::CreatorId",
        to = "crate::domain::user::entity::user::Column::UserId",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::question::Entity")]
    Question,
    #[sea_orm(has_many = "crate::domain::completion::entity::completed_survey::Entity")]
    CompletedSurvey,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<crate::domain::completion::entity::completed_survey::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompletedSurvey.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
