use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "price_packages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tour_id: Uuid,
    pub name: String,
    pub is_default: bool,
    pub is_active: bool,
    pub sort_order: i32,
    pub adult_price: f64,
    pub adult_crossed_price: Option<f64>,
    pub adult_min_pax: i32,
    pub adult_max_pax: Option<i32>,
    pub child_price: Option<f64>,
    pub child_crossed_price: Option<f64>,
    pub child_min_pax: i32,
    pub child_max_pax: Option<i32>,
    pub child_age_min: Option<i32>,
    pub child_age_max: Option<i32>,
    pub group_discount_enabled: bool,
    pub group_discount_percentage: Option<f64>,
    pub group_discount_min_pax: Option<i32>,
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
    DateOverrides,
}

impl Related<super::tour::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tour.def()
    }
}

impl Related<super::tour_date_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DateOverrides.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
