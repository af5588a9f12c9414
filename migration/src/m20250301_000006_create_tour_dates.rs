use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000004_create_tours::Tour;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TourDate::Table)
                    .if_not_exists()
                    .col(uuid(TourDate::Id).primary_key())
                    .col(uuid(TourDate::TourId).not_null())
                    .col(date(TourDate::StartingDate).not_null())
                    .col(integer(TourDate::CutoffDays).not_null().default(0))
                    .col(integer_null(TourDate::MaxPax))
                    .col(boolean(TourDate::RepeatEnabled).not_null().default(false))
                    .col(string_len_null(TourDate::RepeatPattern, 20))
                    .col(date_null(TourDate::RepeatUntil))
                    .col(
                        timestamp_with_time_zone(TourDate::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_dates_tour")
                            .from(TourDate::Table, TourDate::TourId)
                            .to(Tour::Table, Tour::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TourDate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TourDate {
    #[sea_orm(iden = "tour_dates")]
    Table,
    Id,
    TourId,
    StartingDate,
    CutoffDays,
    MaxPax,
    RepeatEnabled,
    RepeatPattern,
    RepeatUntil,
    CreatedAt,
}
