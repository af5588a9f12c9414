use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activity::Table)
                    .if_not_exists()
                    .col(uuid(Activity::Id).primary_key())
                    .col(string_len(Activity::Name, 200).not_null())
                    .col(string_len(Activity::Slug, 200).not_null().unique_key())
                    .col(text_null(Activity::Description))
                    .col(string_len_null(Activity::Icon, 100))
                    .col(
                        timestamp_with_time_zone(Activity::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Activity {
    #[sea_orm(iden = "activities")]
    Table,
    Id,
    Name,
    Slug,
    Description,
    Icon,
    CreatedAt,
}
