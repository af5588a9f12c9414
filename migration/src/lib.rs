pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_destinations;
mod m20250301_000003_create_activities;
mod m20250301_000004_create_tours;
mod m20250301_000005_create_price_packages;
mod m20250301_000006_create_tour_dates;
mod m20250301_000007_create_tour_date_packages;
mod m20250301_000008_create_tour_date_blocked_dates;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_destinations::Migration),
            Box::new(m20250301_000003_create_activities::Migration),
            Box::new(m20250301_000004_create_tours::Migration),
            Box::new(m20250301_000005_create_price_packages::Migration),
            Box::new(m20250301_000006_create_tour_dates::Migration),
            Box::new(m20250301_000007_create_tour_date_packages::Migration),
            Box::new(m20250301_000008_create_tour_date_blocked_dates::Migration),
        ]
    }
}
