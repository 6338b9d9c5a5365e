use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question_answer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub question_answer_id: i32,
    pub completed_survey_id: i32,
    pub answer_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::completed_survey::Entity",
        from = "Column::CompletedSurveyId",
        to = "super::completed_survey::Column::CompletedSurveyId",
        on_delete = "Cascade"
    )]
    CompletedSurvey,
    #[sea_orm(
        belongs_to = "crate::domain::survey::entity::answer::Entity",
        from = "Column::AnswerId",
        to = "crate::domain::survey::entity::answer::Column::AnswerId",
        on_delete = "Cascade"
    )]
    Answer,
}

impl Related<super::completed_survey::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompletedSurvey.def()
    }
}

impl Related<crate::domain::survey::entity::answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
