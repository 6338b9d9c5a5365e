use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "completed_survey")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub completed_survey_id: i32,
    pub user_id: i32,
    pub survey_id: i32,
    pub completed_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::UserId",
        to = "crate::domain::user::entity::user::Column::UserId",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "crate::domain::survey::entity::survey::Entity",
        from = "Column::SurveyId",
        to = "crate::domain::survey::entity::survey::Column::SurveyId",
        on_delete = "Cascade"
    )]
    Survey,
    #[sea_orm(has_many = "super::question_answer::Entity")]
    QuestionAnswer,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::survey::entity::survey::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Survey.def()
    }
}

impl Related<super::question_answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionAnswer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
