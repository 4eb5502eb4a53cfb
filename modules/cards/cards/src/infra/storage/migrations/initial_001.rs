use sea_orm_migration::prelude::*;

pub const IDX_CARDS_USER_ID: &str = "idx_cards_user_id";
pub const IDX_CARDS_USERNAME: &str = "idx_cards_username";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cards::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cards::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cards::UserId).uuid().not_null())
                    .col(ColumnDef::new(Cards::Name).string().not_null())
                    .col(ColumnDef::new(Cards::Username).string().not_null())
                    .col(ColumnDef::new(Cards::ProfilePictureUrl).text())
                    .col(ColumnDef::new(Cards::Position).json())
                    .col(
                        ColumnDef::new(Cards::BackgroundType)
                            .string()
                            .default("gradient"),
                    )
                    .col(
                        ColumnDef::new(Cards::BackgroundValue)
                            .text()
                            .default("from-blue-500 to-purple-600"),
                    )
                    .col(
                        ColumnDef::new(Cards::DarkMode)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Cards::Emails).json())
                    .col(ColumnDef::new(Cards::PhoneNumbers).json())
                    .col(ColumnDef::new(Cards::Images).json())
                    .col(ColumnDef::new(Cards::Whatsapp).string())
                    .col(ColumnDef::new(Cards::Instagram).string())
                    .col(ColumnDef::new(Cards::Location).string())
                    .col(
                        ColumnDef::new(Cards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CARDS_USER_ID)
                    .table(Cards::Table)
                    .col(Cards::UserId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CARDS_USERNAME)
                    .table(Cards::Table)
                    .col(Cards::Username)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cards::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cards {
    Table,
    Id,
    UserId,
    Name,
    Username,
    ProfilePictureUrl,
    Position,
    BackgroundType,
    BackgroundValue,
    DarkMode,
    Emails,
    PhoneNumbers,
    Images,
    Whatsapp,
    Instagram,
    Location,
    CreatedAt,
    UpdatedAt,
}
