use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single calendar day blocked for one package on one date-series entry.
/// Package-scoped: the same day can be blocked for one package and open for
/// another.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour_date_blocked_dates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tour_date_package_id: Uuid,
    pub blocked_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tour_date_package::Entity",
        from = "Column::TourDatePackageId",
        to = "super::tour_date_package::Column::Id"
    )]
    Override,
}

impl Related<super::tour_date_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Override.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
