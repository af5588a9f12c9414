use sea_orm_migration::{prelude::*, schema::*};

use super::m20250301_000002_create_destinations::Destination;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tour::Table)
                    .if_not_exists()
                    .col(uuid(Tour::Id).primary_key())
                    .col(string_len(Tour::Title, 300).not_null())
                    .col(string_len(Tour::Slug, 300).not_null().unique_key())
                    .col(text_null(Tour::ShortDescription))
                    .col(text_null(Tour::LongDescription))
                    .col(string_len_null(Tour::Category, 100))
                    .col(string_len_null(Tour::Difficulty, 100))
                    .col(text_null(Tour::HeroImageUrl))
                    .col(json(Tour::GalleryImageUrls).not_null())
                    .col(uuid_null(Tour::DestinationId))
                    .col(string_len_null(Tour::DestinationName, 200))
                    .col(string_len_null(Tour::ActivitiesLabel, 300))
                    .col(string_len_null(Tour::DifficultyLevel, 100))
                    .col(integer_null(Tour::DurationDays))
                    .col(integer_null(Tour::AgeMin))
                    .col(integer_null(Tour::AgeMax))
                    .col(integer_null(Tour::GroupSizeMin))
                    .col(integer_null(Tour::GroupSizeMax))
                    .col(boolean(Tour::Featured).not_null().default(false))
                    .col(string_len(Tour::Status, 20).not_null().default("draft"))
                    .col(json(Tour::Itinerary).not_null())
                    .col(json(Tour::Includes).not_null())
                    .col(json(Tour::Excludes).not_null())
                    .col(json(Tour::Faqs).not_null())
                    .col(double_null(Tour::PriceUsd))
                    .col(double_null(Tour::StartingPriceFrom))
                    .col(
                        string_len(Tour::PackageType, 20)
                            .not_null()
                            .default("single"),
                    )
                    .col(string_len_null(Tour::PrimaryPriceCategory, 100))
                    .col(json(Tour::PricePackagesCache).not_null())
                    .col(
                        timestamp_with_time_zone(Tour::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tour::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tours_destination")
                            .from(Tour::Table, Tour::DestinationId)
                            .to(Destination::Table, Destination::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tour::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Tour {
    #[sea_orm(iden = "tours")]
    Table,
    Id,
    Title,
    Slug,
    ShortDescription,
    LongDescription,
    Category,
    Difficulty,
    HeroImageUrl,
    GalleryImageUrls,
    DestinationId,
    DestinationName,
    ActivitiesLabel,
    DifficultyLevel,
    DurationDays,
    AgeMin,
    AgeMax,
    GroupSizeMin,
    GroupSizeMax,
    Featured,
    Status,
    Itinerary,
    Includes,
    Excludes,
    Faqs,
    PriceUsd,
    StartingPriceFrom,
    PackageType,
    PrimaryPriceCategory,
    PricePackagesCache,
    CreatedAt,
    UpdatedAt,
}
