use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000007_create_tour_date_packages::TourDatePackage;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TourDateBlockedDate::Table)
                    .if_not_exists()
                    .col(uuid(TourDateBlockedDate::Id).primary_key())
                    .col(uuid(TourDateBlockedDate::TourDatePackageId).not_null())
                    .col(date(TourDateBlockedDate::BlockedDate).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_date_blocked_dates_override")
                            .from(
                                TourDateBlockedDate::Table,
                                TourDateBlockedDate::TourDatePackageId,
                            )
                            .to(TourDatePackage::Table, TourDatePackage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TourDateBlockedDate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TourDateBlockedDate {
    #[sea_orm(iden = "tour_date_blocked_dates")]
    Table,
    Id,
    TourDatePackageId,
    BlockedDate,
}
