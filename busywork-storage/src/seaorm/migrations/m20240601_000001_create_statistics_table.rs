use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Statistics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Statistics::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Statistics::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Statistics::Framework).string_len(20).not_null())
                    .col(ColumnDef::new(Statistics::Kind).string_len(20).not_null())
                    .col(ColumnDef::new(Statistics::Parameter).string().not_null())
                    .col(ColumnDef::new(Statistics::ElapsedNanos).big_integer().not_null())
                    .col(ColumnDef::new(Statistics::Description).text())
                    .to_owned(),
            )
            .await?;

        // Listing is always per framework in recording order
        manager
            .create_index(
                Index::create()
                    .name("idx_statistics_framework_recorded_at")
                    .table(Statistics::Table)
                    .col(Statistics::Framework)
                    .col(Statistics::RecordedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_statistics_framework_recorded_at")
                    .table(Statistics::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Statistics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Statistics {
    Table,
    Id,
    RecordedAt,
    Framework,
    Kind,
    Parameter,
    ElapsedNanos,
    Description,
}
