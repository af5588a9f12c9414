use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-(tour date, package) override row. Absence of a row is the normal
/// state and means "bookable at the package's base price"; the resolver in
/// `domain::availability` synthesizes that default.
///
/// `(tour_date_id, package_id)` is unique; saving a date's package section
/// deletes and reinserts the whole set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour_date_packages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tour_date_id: Uuid,
    pub package_id: Uuid,
    pub enabled: bool,
    pub price_override: Option<f64>,
    pub max_pax_override: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tour_date::Entity",
        from = "Column::TourDateId",
        to = "super::tour_date::Column::Id"
    )]
    TourDate,
    #[sea_orm(
        belongs_to = "super::price_package::Entity",
        from = "Column::PackageId",
        to = "super::price_package::Column::Id"
    )]
    Package,
    #[sea_orm(has_many = "super::tour_date_blocked_date::Entity")]
    BlockedDates,
}

impl Related<super::tour_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TourDate.def()
    }
}

impl Related<super::price_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Package.def()
    }
}

impl Related<super::tour_date_blocked_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BlockedDates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
