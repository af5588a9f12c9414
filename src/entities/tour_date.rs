use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum RepeatPattern {
    #[sea_orm(string_value = "daily")]
    Daily,
    #[sea_orm(string_value = "weekly")]
    Weekly,
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

// repeat_pattern and repeat_until are only meaningful while repeat_enabled is
// true; the write path nulls them out otherwise. No occurrence expansion
// happens anywhere: a repeating date stays a single row with repeat metadata.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour_dates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tour_id: Uuid,
    pub starting_date: Date,
    pub cutoff_days: i32,
    pub max_pax: Option<i32>,
    pub repeat_enabled: bool,
    pub repeat_pattern: Option<RepeatPattern>,
    pub repeat_until: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tour::Entity",
        from = "Column::TourId",
        to = "super::tour::Column::Id"
    )]
    Tour,
    #[sea_orm(has_many = "super::tour_date_package::Entity")]
    PackageOverrides,
}

impl Related<super::tour::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tour.def()
    }
}

impl Related<super::tour_date_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PackageOverrides.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
