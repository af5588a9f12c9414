use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum TourStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "published")]
    Published,
    #[sea_orm(string_value = "archived")]
    Archived,
}

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    #[sea_orm(string_value = "single")]
    Single,
    #[sea_orm(string_value = "multiple")]
    Multiple,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ItineraryDay {
    pub day: i32,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Itinerary(pub Vec<ItineraryDay>);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct FaqList(pub Vec<Faq>);

/// Read projection of the normalized `price_packages` rows, rebuilt on every
/// package write. The table is the source of truth; this is never hand-edited.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PackageSummary {
    pub id: Uuid,
    pub name: String,
    pub is_default: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub adult_price: f64,
    pub child_price: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PackageCache(pub Vec<PackageSummary>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tours")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub hero_image_url: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub gallery_image_urls: StringList,
    pub destination_id: Option<Uuid>,
    pub destination_name: Option<String>,
    pub activities_label: Option<String>,
    pub difficulty_level: Option<String>,
    pub duration_days: Option<i32>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub group_size_min: Option<i32>,
    pub group_size_max: Option<i32>,
    pub featured: bool,
    pub status: TourStatus,
    #[sea_orm(column_type = "Json")]
    pub itinerary: Itinerary,
    #[sea_orm(column_type = "Json")]
    pub includes: StringList,
    #[sea_orm(column_type = "Json")]
    pub excludes: StringList,
    #[sea_orm(column_type = "Json")]
    pub faqs: FaqList,
    pub price_usd: Option<f64>,
    pub starting_price_from: Option<f64>,
    pub package_type: PackageType,
    pub primary_price_category: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub price_packages_cache: PackageCache,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::destination::Entity",
        from = "Column::DestinationId",
        to = "super::destination::Column::Id"
    )]
    Destination,
    #[sea_orm(has_many = "super::price_package::Entity")]
    PricePackages,
    #[sea_orm(has_many = "super::tour_date::Entity")]
    TourDates,
}

impl Related<super::destination::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Destination.def()
    }
}

impl Related<super::price_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PricePackages.def()
    }
}

impl Related<super::tour_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TourDates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
