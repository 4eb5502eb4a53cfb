use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Ordered list of strings stored as a JSON array column.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub profile_picture_url: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub position: Option<StringList>,
    pub background_type: Option<String>,
    pub background_value: Option<String>,
    pub dark_mode: bool,
    #[sea_orm(column_type = "Json", nullable)]
    pub emails: Option<StringList>,
    #[sea_orm(column_type = "Json", nullable)]
    pub phone_numbers: Option<StringList>,
    #[sea_orm(column_type = "Json", nullable)]
    pub images: Option<StringList>,
    pub whatsapp: Option<String>,
    pub instagram: Option<String>,
    pub location: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
