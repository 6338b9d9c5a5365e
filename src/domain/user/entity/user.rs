use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[sea_orm(string_value = "USER")]
    User,
    #[sea_orm(string_value = "ADMIN")]
    Admin,
}

impl Role {
    /// 토큰 role claim 값
    pub fn as_claim(&self) -> &'static str {
        match self {
            Role::User => crate::utils::jwt::ROLE_USER,
            Role::Admin => crate::utils::jwt::ROLE_ADMIN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    #[sea_orm(unique)]
    pub nickname: String,
    #[sea_orm(unique)]
    pub email: String,
    pub hashed_password: String,
    pub role: Role,
    pub registration_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::survey::entity::survey::Entity")]
    Survey,
    #[sea_orm(has_many = "crate::domain::completion::entity::completed_survey::Entity")]
    CompletedSurvey,
}

impl Related<crate::domain::survey::entity::survey::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Survey.def()
    }
}

impl Related<crate::domain::completion::entity::completed_survey::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompletedSurvey.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
