use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000005_create_price_packages::PricePackage;
use super::m20250301_000006_create_tour_dates::TourDate;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TourDatePackage::Table)
                    .if_not_exists()
                    .col(uuid(TourDatePackage::Id).primary_key())
                    .col(uuid(TourDatePackage::TourDateId).not_null())
                    .col(uuid(TourDatePackage::PackageId).not_null())
                    .col(boolean(TourDatePackage::Enabled).not_null().default(true))
                    .col(double_null(TourDatePackage::PriceOverride))
                    .col(integer_null(TourDatePackage::MaxPaxOverride))
                    .col(text_null(TourDatePackage::Notes))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_date_packages_date")
                            .from(TourDatePackage::Table, TourDatePackage::TourDateId)
                            .to(TourDate::Table, TourDate::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tour_date_packages_package")
                            .from(TourDatePackage::Table, TourDatePackage::PackageId)
                            .to(PricePackage::Table, PricePackage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Override semantics are delete-then-reinsert per date; one row per
        // (date, package) pair is part of the durable contract.
        manager
            .create_index(
                Index::create()
                    .name("uq_tour_date_packages_date_package")
                    .table(TourDatePackage::Table)
                    .col(TourDatePackage::TourDateId)
                    .col(TourDatePackage::PackageId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TourDatePackage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TourDatePackage {
    #[sea_orm(iden = "tour_date_packages")]
    Table,
    Id,
    TourDateId,
    PackageId,
    Enabled,
    PriceOverride,
    MaxPaxOverride,
    Notes,
}
