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
                    .table(PricePackage::Table)
                    .if_not_exists()
                    .col(uuid(PricePackage::Id).primary_key())
                    .col(uuid(PricePackage::TourId).not_null())
                    .col(string_len(PricePackage::Name, 200).not_null())
                    .col(boolean(PricePackage::IsDefault).not_null().default(false))
                    .col(boolean(PricePackage::IsActive).not_null().default(true))
                    .col(integer(PricePackage::SortOrder).not_null().default(0))
                    .col(double(PricePackage::AdultPrice).not_null())
                    .col(double_null(PricePackage::AdultCrossedPrice))
                    .col(integer(PricePackage::AdultMinPax).not_null().default(1))
                    .col(integer_null(PricePackage::AdultMaxPax))
                    .col(double_null(PricePackage::ChildPrice))
                    .col(double_null(PricePackage::ChildCrossedPrice))
                    .col(integer(PricePackage::ChildMinPax).not_null().default(0))
                    .col(integer_null(PricePackage::ChildMaxPax))
                    .col(integer_null(PricePackage::ChildAgeMin))
                    .col(integer_null(PricePackage::ChildAgeMax))
                    .col(
                        boolean(PricePackage::GroupDiscountEnabled)
                            .not_null()
                            .default(false),
                    )
                    .col(double_null(PricePackage::GroupDiscountPercentage))
                    .col(integer_null(PricePackage::GroupDiscountMinPax))
                    .col(
                        timestamp_with_time_zone(PricePackage::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_packages_tour")
                            .from(PricePackage::Table, PricePackage::TourId)
                            .to(Tour::Table, Tour::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PricePackage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PricePackage {
    #[sea_orm(iden = "price_packages")]
    Table,
    Id,
    TourId,
    Name,
    IsDefault,
    IsActive,
    SortOrder,
    AdultPrice,
    AdultCrossedPrice,
    AdultMinPax,
    AdultMaxPax,
    ChildPrice,
    ChildCrossedPrice,
    ChildMinPax,
    ChildMaxPax,
    ChildAgeMin,
    ChildAgeMax,
    GroupDiscountEnabled,
    GroupDiscountPercentage,
    GroupDiscountMinPax,
    CreatedAt,
}
