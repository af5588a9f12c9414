use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Destination::Table)
                    .if_not_exists()
                    .col(uuid(Destination::Id).primary_key())
                    .col(string_len(Destination::Name, 200).not_null())
                    .col(string_len(Destination::Slug, 200).not_null().unique_key())
                    .col(string_len(Destination::Country, 100).not_null())
                    .col(string_len_null(Destination::Region, 100))
                    .col(text_null(Destination::ShortDescription))
                    .col(text_null(Destination::ImageUrl))
                    .col(
                        timestamp_with_time_zone(Destination::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Destination::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Destination {
    #[sea_orm(iden = "destinations")]
    Table,
    Id,
    Name,
    Slug,
    Country,
    Region,
    ShortDescription,
    ImageUrl,
    CreatedAt,
}
