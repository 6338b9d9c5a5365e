use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub answer_id: i32,
    pub text: String,
    pub question_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::QuestionId",
        on_delete = "Cascade"
    )]
    Question,
    #[sea_orm(has_many = "crate::domain::completion::entity::question_answer::Entity")]
    QuestionAnswer,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<crate::domain::completion::entity::question_answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuestionAnswer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
