use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::UserId).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(
                        ColumnDef::new(Users::Paid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Plants::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Plants::PlantId).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Plants::CommonName)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Plants::WaterFrequency).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Garden::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Garden::EntryId).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Garden::UserId).string().not_null())
                    .col(ColumnDef::new(Garden::PlantId).uuid().not_null())
                    .col(
                        ColumnDef::new(Garden::WateredCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Garden::Health)
                            .string()
                            .not_null()
                            .default("Poor"),
                    )
                    .col(
                        ColumnDef::new(Garden::AddedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Garden::LastWateredAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_garden_user")
                            .from(Garden::Table, Garden::UserId)
                            .to(Users::Table, Users::UserId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_garden_plant")
                            .from(Garden::Table, Garden::PlantId)
                            .to(Plants::Table, Plants::PlantId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_garden_user_id")
                    .table(Garden::Table)
                    .col(Garden::UserId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Garden::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plants::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
    Name,
    Email,
    Paid,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Plants {
    Table,
    PlantId,
    CommonName,
    WaterFrequency,
}

#[derive(DeriveIden)]
enum Garden {
    Table,
    EntryId,
    UserId,
    PlantId,
    WateredCount,
    Health,
    AddedAt,
    LastWateredAt,
}
